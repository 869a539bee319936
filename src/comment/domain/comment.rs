//! Comment aggregate and identifier.

use crate::{identity::domain::UserId, task::domain::TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Creates a new random comment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a comment identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors returned while constructing or editing comments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyText,
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    user_id: UserId,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted author.
    pub user_id: UserId,
    /// Persisted text.
    pub text: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment authored by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyText`] when the text is blank.
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        text: &str,
        clock: &impl Clock,
    ) -> Result<Self, CommentDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: CommentId::new(),
            task_id,
            user_id,
            text: validated_text(text)?,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            text: data.text,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user_id` wrote the comment.
    #[must_use]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Replaces the text.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyText`] when the text is blank.
    pub fn edit(&mut self, text: &str, clock: &impl Clock) -> Result<(), CommentDomainError> {
        self.text = validated_text(text)?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validated_text(raw: &str) -> Result<String, CommentDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommentDomainError::EmptyText);
    }
    Ok(trimmed.to_owned())
}
