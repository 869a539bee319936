//! Comment creation and author-only editing.

use crate::{
    comment::{
        domain::{Comment, CommentDomainError, CommentId},
        ports::{CommentRepository, CommentRepositoryError},
    },
    error::ErrorKind,
    identity::domain::Principal,
    task::{
        domain::TaskId,
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for commenting on a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    task_id: TaskId,
    text: String,
}

impl CreateCommentRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(task_id: TaskId, text: impl Into<String>) -> Self {
        Self {
            task_id,
            text: text.into(),
        }
    }
}

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Comment repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// The commented task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),
    /// Only the author may change a comment.
    #[error("forbidden: only the author can modify a comment")]
    NotAuthor(CommentId),
}

impl CommentWorkflowError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::Repository(err) => err.kind(),
            Self::Tasks(err) => err.kind(),
            Self::TaskNotFound(_) | Self::CommentNotFound(_) => ErrorKind::NotFound,
            Self::NotAuthor(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for comment service operations.
pub type CommentWorkflowResult<T> = Result<T, CommentWorkflowError>;

/// Comment orchestration service.
#[derive(Clone)]
pub struct CommentWorkflowService<M, T, C>
where
    M: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    comments: Arc<M>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<M, T, C> CommentWorkflowService<M, T, C>
where
    M: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(comments: Arc<M>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            comments,
            tasks,
            clock,
        }
    }

    /// Comments on a task as the principal.
    ///
    /// # Errors
    ///
    /// Returns [`CommentWorkflowError::TaskNotFound`] for unknown tasks and
    /// [`CommentWorkflowError::Domain`] for blank text.
    pub async fn create_comment(
        &self,
        principal: &Principal,
        request: CreateCommentRequest,
    ) -> CommentWorkflowResult<Comment> {
        info!(task_id = %request.task_id, author = %principal.user_id(), "creating comment");
        if self.tasks.find_by_id(request.task_id).await?.is_none() {
            return Err(CommentWorkflowError::TaskNotFound(request.task_id));
        }
        let comment = Comment::new(
            request.task_id,
            principal.user_id(),
            &request.text,
            &*self.clock,
        )?;
        self.comments.store(&comment).await.inspect_err(|err| {
            error!(error = %err, "failed to create comment");
        })?;
        info!(comment_id = %comment.id(), "comment created");
        Ok(comment)
    }

    /// Returns one comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentWorkflowError::CommentNotFound`] for unknown
    /// identifiers.
    pub async fn get_comment(&self, id: CommentId) -> CommentWorkflowResult<Comment> {
        self.require_comment(id).await
    }

    /// Returns a task's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentWorkflowError::Repository`] when the lookup fails.
    pub async fn comments_for_task(&self, task_id: TaskId) -> CommentWorkflowResult<Vec<Comment>> {
        Ok(self.comments.find_by_task(task_id).await?)
    }

    /// Replaces a comment's text.
    ///
    /// # Errors
    ///
    /// Returns [`CommentWorkflowError::CommentNotFound`],
    /// [`CommentWorkflowError::NotAuthor`] unless the principal wrote the
    /// comment, and [`CommentWorkflowError::Domain`] for blank text.
    pub async fn update_comment(
        &self,
        principal: &Principal,
        id: CommentId,
        text: &str,
    ) -> CommentWorkflowResult<Comment> {
        info!(comment_id = %id, actor = %principal.user_id(), "updating comment");
        let mut comment = self.require_authored(principal, id).await?;
        comment.edit(text, &*self.clock)?;
        self.comments.update(&comment).await.inspect_err(|err| {
            error!(comment_id = %id, error = %err, "failed to update comment");
        })?;
        Ok(comment)
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentWorkflowError::CommentNotFound`] or
    /// [`CommentWorkflowError::NotAuthor`] as for updates.
    pub async fn delete_comment(
        &self,
        principal: &Principal,
        id: CommentId,
    ) -> CommentWorkflowResult<()> {
        info!(comment_id = %id, actor = %principal.user_id(), "deleting comment");
        self.require_authored(principal, id).await?;
        self.comments.delete(id).await.map_err(|err| match err {
            CommentRepositoryError::NotFound(missing) => {
                CommentWorkflowError::CommentNotFound(missing)
            }
            other => other.into(),
        })?;
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn require_comment(&self, id: CommentId) -> CommentWorkflowResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(CommentWorkflowError::CommentNotFound(id))
    }

    async fn require_authored(
        &self,
        principal: &Principal,
        id: CommentId,
    ) -> CommentWorkflowResult<Comment> {
        let comment = self.require_comment(id).await?;
        if comment.is_authored_by(principal.user_id()) {
            Ok(comment)
        } else {
            warn!(comment_id = %id, actor = %principal.user_id(), "non-author attempted to modify comment");
            Err(CommentWorkflowError::NotAuthor(id))
        }
    }
}
