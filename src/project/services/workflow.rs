//! Project creation, update, deletion, and membership orchestration.

use crate::{
    attachment::{AttachmentReport, SkipReason, SkippedAttachment},
    error::ErrorKind,
    identity::{
        domain::{Principal, UserId},
        ports::{UserRepository, UserRepositoryError},
    },
    project::{
        domain::{MemberRole, NewProjectData, Project, ProjectDomainError, ProjectId, ProjectMember},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProjectRequest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    member_ids: Vec<UserId>,
}

impl CreateProjectRequest {
    /// Creates a request with the project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: String::new(),
            member_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status; blank keeps the default.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the users to add as developers.
    #[must_use]
    pub fn with_member_ids(mut self, member_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.member_ids = member_ids.into_iter().collect();
        self
    }
}

/// Partial update of a project.
///
/// Empty strings leave fields unchanged. A present member list, even an
/// empty one, replaces every membership except the manager's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateProjectRequest {
    name: String,
    description: String,
    status: String,
    member_ids: Option<Vec<UserId>>,
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets a new status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Replaces the developer membership with the given users.
    #[must_use]
    pub fn with_member_ids(mut self, member_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.member_ids = Some(member_ids.into_iter().collect());
        self
    }
}

/// Project with its member identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    /// The project.
    #[serde(flatten)]
    pub project: Project,
    /// Current members, manager first when created through the workflow.
    pub member_ids: Vec<UserId>,
    /// Requested members that were not added.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_members: Vec<SkippedAttachment<UserId>>,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The user is already a member.
    #[error("user {user_id} is already a member of project {project_id}")]
    AlreadyMember {
        /// Target project.
        project_id: ProjectId,
        /// Existing member.
        user_id: UserId,
    },
    /// The project manager cannot leave their own project.
    #[error("cannot remove project manager")]
    CannotRemoveManager(ProjectId),
    /// The principal may not perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl ProjectWorkflowError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::Repository(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::ProjectNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::AlreadyMember { .. } => ErrorKind::Conflict,
            Self::CannotRemoveManager(_) | Self::Forbidden(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for project service operations.
pub type ProjectWorkflowResult<T> = Result<T, ProjectWorkflowError>;

/// Project and membership orchestration service.
#[derive(Clone)]
pub struct ProjectWorkflowService<P, U, C>
where
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, U, C> ProjectWorkflowService<P, U, C>
where
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            users,
            clock,
        }
    }

    /// Creates a project owned by the principal.
    ///
    /// The principal joins as `project_manager` first. Requested members are
    /// then added as developers; unknown users, repeats, and the principal
    /// are skipped and reported on the view.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::Forbidden`] unless the principal is a
    /// manager and [`ProjectWorkflowError::Domain`] for a blank name.
    pub async fn create_project(
        &self,
        principal: &Principal,
        request: CreateProjectRequest,
    ) -> ProjectWorkflowResult<ProjectView> {
        info!(manager_id = %principal.user_id(), name = %request.name, "creating project");
        if !principal.is_manager() {
            warn!(actor = %principal.user_id(), "non-manager attempted to create project");
            return Err(ProjectWorkflowError::Forbidden(
                "only managers can create projects",
            ));
        }

        let project = Project::new(
            NewProjectData {
                name: request.name,
                description: request.description,
                manager_id: principal.user_id(),
                status: request.status,
            },
            &*self.clock,
        )?;
        self.projects.store(&project).await.inspect_err(|err| {
            error!(error = %err, "failed to create project");
        })?;

        let mut report = AttachmentReport::new();
        let manager_row = ProjectMember::new(
            project.id(),
            principal.user_id(),
            MemberRole::project_manager(),
            &*self.clock,
        );
        if let Err(err) = self.projects.add_member(&manager_row).await {
            warn!(project_id = %project.id(), error = %err, "failed to add manager as member");
        }
        report.attach(principal.user_id());
        self.attach_developers(&project, &request.member_ids, &mut report)
            .await;

        info!(
            project_id = %project.id(),
            members = report.attached().len(),
            skipped = report.skipped().len(),
            "project created"
        );
        let (member_ids, skipped_members) = report.into_parts();
        Ok(ProjectView {
            project,
            member_ids,
            skipped_members,
        })
    }

    /// Returns one project with its members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::ProjectNotFound`] for unknown
    /// identifiers.
    pub async fn get_project(&self, id: ProjectId) -> ProjectWorkflowResult<ProjectView> {
        let project = self.require_project(id).await?;
        Ok(self.enrich(project).await)
    }

    /// Returns the projects a manager owns, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::Repository`] when the lookup fails.
    pub async fn projects_by_manager(
        &self,
        manager_id: UserId,
    ) -> ProjectWorkflowResult<Vec<ProjectView>> {
        let projects = self.projects.find_by_manager(manager_id).await?;
        Ok(self.enrich_all(projects).await)
    }

    /// Returns every project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::Repository`] when the lookup fails.
    pub async fn all_projects(&self) -> ProjectWorkflowResult<Vec<ProjectView>> {
        let projects = self.projects.list().await?;
        Ok(self.enrich_all(projects).await)
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::ProjectNotFound`],
    /// [`ProjectWorkflowError::Forbidden`] unless the principal manages the
    /// project or is a manager, or [`ProjectWorkflowError::Domain`].
    pub async fn update_project(
        &self,
        principal: &Principal,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectWorkflowResult<ProjectView> {
        info!(project_id = %id, actor = %principal.user_id(), "updating project");
        let mut project = self.require_project(id).await?;
        require_project_authority(
            principal,
            &project,
            "only the project manager can update project",
        )?;

        if !request.name.trim().is_empty() {
            project.rename(request.name, &*self.clock)?;
        }
        if !request.description.is_empty() {
            project.set_description(request.description, &*self.clock);
        }
        if !request.status.is_empty() {
            project.set_status(request.status, &*self.clock);
        }
        self.projects.update(&project).await.inspect_err(|err| {
            error!(project_id = %id, error = %err, "failed to update project");
        })?;

        let mut skipped_members = Vec::new();
        if let Some(member_ids) = request.member_ids {
            let removed = self
                .projects
                .remove_members_except(id, project.manager_id())
                .await?;
            info!(project_id = %id, removed, "replacing project members");
            let mut report = AttachmentReport::new();
            report.attach(project.manager_id());
            self.attach_developers(&project, &member_ids, &mut report)
                .await;
            skipped_members = report.into_parts().1;
        }

        info!(project_id = %id, "project updated");
        let mut view = self.enrich(project).await;
        view.skipped_members = skipped_members;
        Ok(view)
    }

    /// Deletes a project and its membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::ProjectNotFound`] or
    /// [`ProjectWorkflowError::Forbidden`] as for updates.
    pub async fn delete_project(
        &self,
        principal: &Principal,
        id: ProjectId,
    ) -> ProjectWorkflowResult<()> {
        info!(project_id = %id, actor = %principal.user_id(), "deleting project");
        let project = self.require_project(id).await?;
        require_project_authority(
            principal,
            &project,
            "only the project manager can delete project",
        )?;
        self.projects.delete(id).await.map_err(|err| match err {
            ProjectRepositoryError::NotFound(missing) => {
                ProjectWorkflowError::ProjectNotFound(missing)
            }
            other => other.into(),
        })?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Adds a user to a project.
    ///
    /// A missing or blank role adds the user as a developer.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::ProjectNotFound`] or
    /// [`ProjectWorkflowError::UserNotFound`] for unknown identifiers,
    /// [`ProjectWorkflowError::Forbidden`] as for updates, and
    /// [`ProjectWorkflowError::AlreadyMember`] for existing members.
    pub async fn add_member(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        user_id: UserId,
        role: Option<MemberRole>,
    ) -> ProjectWorkflowResult<ProjectMember> {
        info!(project_id = %project_id, user_id = %user_id, "adding project member");
        let project = self.require_project(project_id).await?;
        require_project_authority(principal, &project, "only the project manager can add members")?;

        if self.projects.find_member(project_id, user_id).await?.is_some() {
            return Err(ProjectWorkflowError::AlreadyMember {
                project_id,
                user_id,
            });
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ProjectWorkflowError::UserNotFound(user_id));
        }

        let member = ProjectMember::new(
            project_id,
            user_id,
            role.unwrap_or_default(),
            &*self.clock,
        );
        self.projects.add_member(&member).await.map_err(|err| match err {
            ProjectRepositoryError::DuplicateMember { .. } => ProjectWorkflowError::AlreadyMember {
                project_id,
                user_id,
            },
            other => other.into(),
        })?;
        info!(project_id = %project_id, user_id = %user_id, role = %member.role(), "project member added");
        Ok(member)
    }

    /// Removes a user from a project.
    ///
    /// Removing a user who is not a member is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectWorkflowError::ProjectNotFound`] for unknown projects
    /// and [`ProjectWorkflowError::CannotRemoveManager`] for the owning
    /// manager.
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectWorkflowResult<()> {
        info!(project_id = %project_id, user_id = %user_id, "removing project member");
        let project = self.require_project(project_id).await?;
        if project.is_managed_by(user_id) {
            warn!(project_id = %project_id, "refusing to remove project manager");
            return Err(ProjectWorkflowError::CannotRemoveManager(project_id));
        }
        if !self.projects.remove_member(project_id, user_id).await? {
            warn!(project_id = %project_id, user_id = %user_id, "user was not a member");
        }
        Ok(())
    }

    async fn require_project(&self, id: ProjectId) -> ProjectWorkflowResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectWorkflowError::ProjectNotFound(id))
    }

    async fn attach_developers(
        &self,
        project: &Project,
        member_ids: &[UserId],
        report: &mut AttachmentReport<UserId>,
    ) {
        for &user_id in member_ids {
            if report.has_seen(user_id) {
                if !project.is_managed_by(user_id) {
                    report.skip(user_id, SkipReason::Duplicate);
                }
                continue;
            }
            if project.is_managed_by(user_id) {
                continue;
            }
            match self.users.find_by_id(user_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(user_id = %user_id, "user not found, skipping");
                    report.skip(user_id, SkipReason::NotFound);
                    continue;
                }
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "user lookup failed, skipping");
                    report.skip(user_id, SkipReason::Persistence(err.to_string()));
                    continue;
                }
            }
            let member =
                ProjectMember::new(project.id(), user_id, MemberRole::developer(), &*self.clock);
            match self.projects.add_member(&member).await {
                Ok(()) => report.attach(user_id),
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "failed to add member to project");
                    report.skip(user_id, SkipReason::Persistence(err.to_string()));
                }
            }
        }
    }

    async fn enrich(&self, project: Project) -> ProjectView {
        let member_ids = match self.projects.members(project.id()).await {
            Ok(members) => members.iter().map(ProjectMember::user_id).collect(),
            Err(err) => {
                warn!(project_id = %project.id(), error = %err, "member lookup failed");
                Vec::new()
            }
        };
        ProjectView {
            project,
            member_ids,
            skipped_members: Vec::new(),
        }
    }

    async fn enrich_all(&self, projects: Vec<Project>) -> Vec<ProjectView> {
        let mut views = Vec::with_capacity(projects.len());
        for project in projects {
            views.push(self.enrich(project).await);
        }
        views
    }
}

fn require_project_authority(
    principal: &Principal,
    project: &Project,
    reason: &'static str,
) -> ProjectWorkflowResult<()> {
    if principal.is_manager() || project.is_managed_by(principal.user_id()) {
        Ok(())
    } else {
        warn!(actor = %principal.user_id(), project_id = %project.id(), reason, "forbidden");
        Err(ProjectWorkflowError::Forbidden(reason))
    }
}
