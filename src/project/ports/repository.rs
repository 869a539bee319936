//! Repository port for projects and their membership rows.

use crate::{
    error::ErrorKind,
    identity::domain::UserId,
    project::domain::{Project, ProjectId, ProjectMember},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project together with its membership rows.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns the projects owned by a manager, newest first.
    async fn find_by_manager(&self, manager_id: UserId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns every project, newest first.
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Adds a membership row.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateMember`] when the user is
    /// already a member.
    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()>;

    /// Finds the membership of a user in a project.
    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>>;

    /// Returns a project's members in joining order.
    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<ProjectMember>>;

    /// Removes a membership row.
    ///
    /// Returns `false` when the user was not a member.
    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool>;

    /// Removes every membership row except the one for `keep`.
    ///
    /// Returns the number of rows removed.
    async fn remove_members_except(
        &self,
        project_id: ProjectId,
        keep: UserId,
    ) -> ProjectRepositoryResult<usize>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The user is already a member of the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    DuplicateMember {
        /// Target project.
        project_id: ProjectId,
        /// Existing member.
        user_id: UserId,
    },

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateProject(_) | Self::DuplicateMember { .. } => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}
