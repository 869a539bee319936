//! In-memory repository for comments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    comment::{
        domain::{Comment, CommentId},
        ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
    },
    task::domain::TaskId,
};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: HashMap<CommentId, Comment>,
    insertion_order: Vec<CommentId>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.comments.contains_key(&comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        state.insertion_order.push(comment.id());
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .comments
            .get_mut(&comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .comments
            .remove(&id)
            .ok_or(CommentRepositoryError::NotFound(id))?;
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.comments.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.comments.get(id))
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect())
    }
}
