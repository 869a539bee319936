//! Repository port for tasks, their required skills, and their assignees.

use crate::{
    error::ErrorKind,
    identity::domain::UserId,
    project::domain::ProjectId,
    skill::domain::SkillId,
    task::domain::{Task, TaskId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task together with its skill and assignee rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns a project's tasks, newest first.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks a user is assigned to, newest first.
    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks whose parent is `parent_id`, newest first.
    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>>;

    /// Records that a task requires a skill.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateSkill`] when the skill is
    /// already required.
    async fn attach_skill(&self, task_id: TaskId, skill_id: SkillId) -> TaskRepositoryResult<()>;

    /// Returns the skills a task requires, in attachment order.
    async fn skills(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<SkillId>>;

    /// Removes every required skill from a task.
    async fn clear_skills(&self, task_id: TaskId) -> TaskRepositoryResult<()>;

    /// Assigns a user to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateAssignee`] when the user is
    /// already assigned.
    async fn attach_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<()>;

    /// Returns a task's assignees, in attachment order.
    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>>;

    /// Removes every assignee from a task.
    async fn clear_assignees(&self, task_id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task already requires the skill.
    #[error("task {task_id} already requires skill {skill_id}")]
    DuplicateSkill {
        /// Target task.
        task_id: TaskId,
        /// Required skill.
        skill_id: SkillId,
    },

    /// The user is already assigned to the task.
    #[error("user {user_id} is already assigned to task {task_id}")]
    DuplicateAssignee {
        /// Target task.
        task_id: TaskId,
        /// Assigned user.
        user_id: UserId,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateTask(_)
            | Self::DuplicateSkill { .. }
            | Self::DuplicateAssignee { .. } => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}
