//! Repository port for task comments.

use crate::{
    comment::domain::{Comment, CommentId},
    error::ErrorKind,
    task::domain::TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::DuplicateComment`] when the ID
    /// already exists.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Persists an edited comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the comment does
    /// not exist.
    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the comment does
    /// not exist.
    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()>;

    /// Finds a comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Returns a task's comments, oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The comment was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateComment(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}
