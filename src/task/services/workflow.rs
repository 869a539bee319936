//! Task creation, update, deletion, and skill-gated assignment.

use crate::{
    attachment::{AttachmentReport, SkipReason, SkippedAttachment},
    error::ErrorKind,
    identity::{
        domain::{Principal, UserId},
        ports::{UserRepository, UserRepositoryError},
    },
    project::{
        domain::{Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    skill::{
        domain::{SkillId, UserSkill, covers_required_skills},
        ports::{SkillRepository, SkillRepositoryError},
    },
    task::{
        domain::{
            NewTaskData, Progress, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus,
            TaskType, parse_deadline,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    #[serde(default)]
    description: String,
    deadline: String,
    #[serde(default)]
    hours: u32,
    #[serde(default)]
    priority: String,
    #[serde(default, rename = "type")]
    task_type: String,
    #[serde(default)]
    parent_task_id: Option<TaskId>,
    #[serde(default)]
    skill_ids: Vec<SkillId>,
    #[serde(default)]
    assignee_ids: Vec<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    ///
    /// `deadline` is an RFC 3339 timestamp.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            deadline: deadline.into(),
            hours: 0,
            priority: String::new(),
            task_type: String::new(),
            parent_task_id: None,
            skill_ids: Vec::new(),
            assignee_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the hour estimate.
    #[must_use]
    pub const fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the priority; blank means medium.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the kind of work; blank means task.
    #[must_use]
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    /// Makes the task depend on a completed parent.
    #[must_use]
    pub const fn with_parent(mut self, parent_task_id: TaskId) -> Self {
        self.parent_task_id = Some(parent_task_id);
        self
    }

    /// Sets the required skills.
    #[must_use]
    pub fn with_skill_ids(mut self, skill_ids: impl IntoIterator<Item = SkillId>) -> Self {
        self.skill_ids = skill_ids.into_iter().collect();
        self
    }

    /// Sets the requested assignees.
    #[must_use]
    pub fn with_assignee_ids(mut self, assignee_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = assignee_ids.into_iter().collect();
        self
    }
}

/// Partial update of a task.
///
/// Empty strings and zero hours leave fields unchanged. `parent_task_id`
/// distinguishes an absent field from an explicit `null`, which clears the
/// parent. Present skill or assignee lists, even empty ones, replace the
/// current rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    title: String,
    description: String,
    deadline: String,
    hours: u32,
    priority: String,
    #[serde(rename = "type")]
    task_type: String,
    status: String,
    progress: Option<i32>,
    #[serde(deserialize_with = "deserialize_some")]
    parent_task_id: Option<Option<TaskId>>,
    skill_ids: Option<Vec<SkillId>>,
    assignee_ids: Option<Vec<UserId>>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Moves the deadline; the value is an RFC 3339 timestamp.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    /// Sets a new hour estimate.
    #[must_use]
    pub const fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets a new kind of work.
    #[must_use]
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    /// Sets a new status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Records progress as a percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: i32) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the parent task, or clears it with `None`.
    #[must_use]
    pub const fn with_parent(mut self, parent_task_id: Option<TaskId>) -> Self {
        self.parent_task_id = Some(parent_task_id);
        self
    }

    /// Replaces the required skills.
    #[must_use]
    pub fn with_skill_ids(mut self, skill_ids: impl IntoIterator<Item = SkillId>) -> Self {
        self.skill_ids = Some(skill_ids.into_iter().collect());
        self
    }

    /// Replaces the assignees.
    #[must_use]
    pub fn with_assignee_ids(mut self, assignee_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = Some(assignee_ids.into_iter().collect());
        self
    }
}

/// Task with its required skills and assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// The task.
    #[serde(flatten)]
    pub task: Task,
    /// Required skills.
    pub skill_ids: Vec<SkillId>,
    /// Assigned users.
    pub assignee_ids: Vec<UserId>,
    /// Requested skills that were not attached.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_skills: Vec<SkippedAttachment<SkillId>>,
    /// Requested assignees that were not attached.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_assignees: Vec<SkippedAttachment<UserId>>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Skill lookup failed.
    #[error(transparent)]
    Skills(#[from] SkillRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The requested parent task does not exist.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),
    /// The requested parent task is not completed yet.
    #[error("parent task must be completed")]
    ParentIncomplete(TaskId),
    /// Other tasks name this task as their parent.
    #[error("cannot delete task with dependent tasks")]
    HasDependents(TaskId),
    /// A task cannot be its own parent.
    #[error("task cannot be its own parent: {0}")]
    SelfParent(TaskId),
    /// The principal may not perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl TaskWorkflowError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::SelfParent(_) => ErrorKind::InvalidInput,
            Self::Repository(err) => err.kind(),
            Self::Projects(err) => err.kind(),
            Self::Skills(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::ProjectNotFound(_) | Self::TaskNotFound(_) | Self::ParentNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::ParentIncomplete(_) | Self::HasDependents(_) => ErrorKind::PreconditionFailed,
            Self::Forbidden(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for task service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task orchestration service.
///
/// Project authority gates every mutation: the principal must be a manager
/// or manage the owning project.
#[derive(Clone)]
pub struct TaskWorkflowService<T, P, S, U, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    S: SkillRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    skills: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, P, S, U, C> TaskWorkflowService<T, P, S, U, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    S: SkillRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        skills: Arc<S>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            projects,
            skills,
            users,
            clock,
        }
    }

    /// Creates a task, attaches the skills it requires, and assigns users.
    ///
    /// Unknown skills and users are skipped. When the task requires at least
    /// one skill, candidates who do not hold every required skill are skipped
    /// as ineligible. Skips are reported on the view and never fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::ProjectNotFound`],
    /// [`TaskWorkflowError::Forbidden`] without project authority,
    /// [`TaskWorkflowError::ParentNotFound`] or
    /// [`TaskWorkflowError::ParentIncomplete`] for an unusable parent, and
    /// [`TaskWorkflowError::Domain`] for invalid fields.
    pub async fn create_task(
        &self,
        principal: &Principal,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<TaskView> {
        info!(
            project_id = %request.project_id,
            actor = %principal.user_id(),
            title = %request.title,
            "creating task"
        );
        let project = self.require_project(request.project_id).await?;
        require_project_authority(
            principal,
            &project,
            "only the project manager can create tasks",
        )?;
        if let Some(parent_id) = request.parent_task_id {
            self.require_completed_parent(parent_id).await?;
        }

        let task = Task::new(
            NewTaskData {
                project_id: request.project_id,
                title: request.title,
                description: request.description,
                deadline: parse_deadline(&request.deadline)?,
                hours: request.hours,
                priority: TaskPriority::parse_or_default(&request.priority)?,
                task_type: TaskType::parse_or_default(&request.task_type)?,
                parent_task_id: request.parent_task_id,
            },
            &*self.clock,
        )?;
        self.tasks.store(&task).await.inspect_err(|err| {
            error!(error = %err, "failed to create task");
        })?;

        let skill_report = self.attach_skills(task.id(), &request.skill_ids).await;
        let assignee_report = self
            .attach_assignees(task.id(), skill_report.attached(), &request.assignee_ids)
            .await;

        info!(
            task_id = %task.id(),
            skills = skill_report.attached().len(),
            assignees = assignee_report.attached().len(),
            skipped = skill_report.skipped().len() + assignee_report.skipped().len(),
            "task created"
        );
        let (skill_ids, skipped_skills) = skill_report.into_parts();
        let (assignee_ids, skipped_assignees) = assignee_report.into_parts();
        Ok(TaskView {
            task,
            skill_ids,
            assignee_ids,
            skipped_skills,
            skipped_assignees,
        })
    }

    /// Returns one task with its skills and assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] for unknown identifiers.
    pub async fn get_task(&self, id: TaskId) -> TaskWorkflowResult<TaskView> {
        let task = self.require_task(id).await?;
        Ok(self.enrich(task).await)
    }

    /// Returns a project's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the lookup fails.
    pub async fn tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> TaskWorkflowResult<Vec<TaskView>> {
        let tasks = self.tasks.find_by_project(project_id).await?;
        Ok(self.enrich_all(tasks).await)
    }

    /// Returns the tasks a user is assigned to, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the lookup fails.
    pub async fn tasks_by_user(&self, user_id: UserId) -> TaskWorkflowResult<Vec<TaskView>> {
        let tasks = self.tasks.find_by_assignee(user_id).await?;
        Ok(self.enrich_all(tasks).await)
    }

    /// Applies a partial update to a task.
    ///
    /// A present assignee list is checked against the skills the task
    /// requires after any skill replacement in the same request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::Forbidden`] without project authority, parent
    /// errors as for creation, [`TaskWorkflowError::SelfParent`], and
    /// [`TaskWorkflowError::Domain`] for invalid fields.
    pub async fn update_task(
        &self,
        principal: &Principal,
        id: TaskId,
        mut request: UpdateTaskRequest,
    ) -> TaskWorkflowResult<TaskView> {
        info!(task_id = %id, actor = %principal.user_id(), "updating task");
        let mut task = self.require_task(id).await?;
        let project = self.require_project(task.project_id()).await?;
        require_project_authority(
            principal,
            &project,
            "only the project manager can update tasks",
        )?;

        let skill_ids = request.skill_ids.take();
        let assignee_ids = request.assignee_ids.take();
        self.apply_update(&mut task, request).await?;
        self.tasks.update(&task).await.inspect_err(|err| {
            error!(task_id = %id, error = %err, "failed to update task");
        })?;

        let mut skipped_skills = Vec::new();
        if let Some(requested) = skill_ids {
            self.tasks.clear_skills(id).await?;
            skipped_skills = self.attach_skills(id, &requested).await.into_parts().1;
        }
        let mut skipped_assignees = Vec::new();
        if let Some(requested) = assignee_ids {
            let required = self.tasks.skills(id).await?;
            self.tasks.clear_assignees(id).await?;
            skipped_assignees = self
                .attach_assignees(id, &required, &requested)
                .await
                .into_parts()
                .1;
        }

        info!(task_id = %id, status = %task.status(), "task updated");
        let mut view = self.enrich(task).await;
        view.skipped_skills = skipped_skills;
        view.skipped_assignees = skipped_assignees;
        Ok(view)
    }

    /// Deletes a task together with its skill and assignee rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::Forbidden`] as for updates, and
    /// [`TaskWorkflowError::HasDependents`] while other tasks name this one
    /// as their parent.
    pub async fn delete_task(&self, principal: &Principal, id: TaskId) -> TaskWorkflowResult<()> {
        info!(task_id = %id, actor = %principal.user_id(), "deleting task");
        let task = self.require_task(id).await?;
        let project = self.require_project(task.project_id()).await?;
        require_project_authority(
            principal,
            &project,
            "only the project manager can delete tasks",
        )?;

        let dependents = self.tasks.find_children(id).await?;
        if !dependents.is_empty() {
            warn!(task_id = %id, dependents = dependents.len(), "task has dependent tasks");
            return Err(TaskWorkflowError::HasDependents(id));
        }
        self.tasks.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskWorkflowError::TaskNotFound(missing),
            other => other.into(),
        })?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn apply_update(
        &self,
        task: &mut Task,
        request: UpdateTaskRequest,
    ) -> TaskWorkflowResult<()> {
        let clock = &*self.clock;
        if !request.title.trim().is_empty() {
            task.retitle(request.title, clock)?;
        }
        if !request.description.is_empty() {
            task.set_description(request.description, clock);
        }
        if !request.deadline.trim().is_empty() {
            task.set_deadline(parse_deadline(&request.deadline)?, clock);
        }
        if request.hours > 0 {
            task.set_hours(request.hours, clock)?;
        }
        if !request.priority.trim().is_empty() {
            task.set_priority(TaskPriority::try_from(request.priority.as_str())?, clock);
        }
        if !request.task_type.trim().is_empty() {
            task.set_task_type(TaskType::try_from(request.task_type.as_str())?, clock);
        }
        if !request.status.trim().is_empty() {
            task.set_status(TaskStatus::try_from(request.status.as_str())?, clock);
        }
        if let Some(progress) = request.progress {
            task.set_progress(Progress::new(progress)?, clock);
        }
        match request.parent_task_id {
            Some(Some(parent_id)) => {
                if parent_id == task.id() {
                    return Err(TaskWorkflowError::SelfParent(parent_id));
                }
                self.require_completed_parent(parent_id).await?;
                task.set_parent(Some(parent_id), clock);
            }
            Some(None) => task.set_parent(None, clock),
            None => {}
        }
        Ok(())
    }

    async fn require_project(&self, id: ProjectId) -> TaskWorkflowResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::ProjectNotFound(id))
    }

    async fn require_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(id))
    }

    async fn require_completed_parent(&self, parent_id: TaskId) -> TaskWorkflowResult<()> {
        let parent = self
            .tasks
            .find_by_id(parent_id)
            .await?
            .ok_or(TaskWorkflowError::ParentNotFound(parent_id))?;
        if parent.is_completed() {
            Ok(())
        } else {
            warn!(parent_id = %parent_id, status = %parent.status(), "parent task not completed");
            Err(TaskWorkflowError::ParentIncomplete(parent_id))
        }
    }

    async fn attach_skills(
        &self,
        task_id: TaskId,
        skill_ids: &[SkillId],
    ) -> AttachmentReport<SkillId> {
        let mut report = AttachmentReport::new();
        for &skill_id in skill_ids {
            if report.has_seen(skill_id) {
                report.skip(skill_id, SkipReason::Duplicate);
                continue;
            }
            match self.skills.find_skill(skill_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(skill_id = %skill_id, "skill not found, skipping");
                    report.skip(skill_id, SkipReason::NotFound);
                    continue;
                }
                Err(err) => {
                    warn!(skill_id = %skill_id, error = %err, "skill lookup failed, skipping");
                    report.skip(skill_id, SkipReason::Persistence(err.to_string()));
                    continue;
                }
            }
            match self.tasks.attach_skill(task_id, skill_id).await {
                Ok(()) => report.attach(skill_id),
                Err(err) => {
                    warn!(task_id = %task_id, skill_id = %skill_id, error = %err, "failed to attach skill");
                    report.skip(skill_id, SkipReason::Persistence(err.to_string()));
                }
            }
        }
        report
    }

    async fn attach_assignees(
        &self,
        task_id: TaskId,
        required: &[SkillId],
        assignee_ids: &[UserId],
    ) -> AttachmentReport<UserId> {
        let mut report = AttachmentReport::new();
        for &user_id in assignee_ids {
            if report.has_seen(user_id) {
                report.skip(user_id, SkipReason::Duplicate);
                continue;
            }
            if let Some(reason) = self.assignment_blocker(user_id, required).await {
                report.skip(user_id, reason);
                continue;
            }
            match self.tasks.attach_assignee(task_id, user_id).await {
                Ok(()) => report.attach(user_id),
                Err(err) => {
                    warn!(task_id = %task_id, user_id = %user_id, error = %err, "failed to assign user");
                    report.skip(user_id, SkipReason::Persistence(err.to_string()));
                }
            }
        }
        report
    }

    /// Returns why a user cannot be assigned, or `None` when they can.
    async fn assignment_blocker(
        &self,
        user_id: UserId,
        required: &[SkillId],
    ) -> Option<SkipReason> {
        match self.users.find_by_id(user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(user_id = %user_id, "user not found, skipping");
                return Some(SkipReason::NotFound);
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "user lookup failed, skipping");
                return Some(SkipReason::Persistence(err.to_string()));
            }
        }
        if required.is_empty() {
            return None;
        }
        match self.skills.user_skills_for_user(user_id).await {
            Ok(held) => {
                if covers_required_skills(required, held.iter().map(UserSkill::skill_id)) {
                    None
                } else {
                    warn!(user_id = %user_id, "user lacks required skills, skipping");
                    Some(SkipReason::Ineligible)
                }
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "skill lookup failed, skipping");
                Some(SkipReason::Persistence(err.to_string()))
            }
        }
    }

    async fn enrich(&self, task: Task) -> TaskView {
        let skill_ids = self.tasks.skills(task.id()).await.unwrap_or_else(|err| {
            warn!(task_id = %task.id(), error = %err, "skill lookup failed");
            Vec::new()
        });
        let assignee_ids = self.tasks.assignees(task.id()).await.unwrap_or_else(|err| {
            warn!(task_id = %task.id(), error = %err, "assignee lookup failed");
            Vec::new()
        });
        TaskView {
            task,
            skill_ids,
            assignee_ids,
            skipped_skills: Vec::new(),
            skipped_assignees: Vec::new(),
        }
    }

    async fn enrich_all(&self, tasks: Vec<Task>) -> Vec<TaskView> {
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(self.enrich(task).await);
        }
        views
    }
}

fn require_project_authority(
    principal: &Principal,
    project: &Project,
    reason: &'static str,
) -> TaskWorkflowResult<()> {
    if principal.is_manager() || project.is_managed_by(principal.user_id()) {
        Ok(())
    } else {
        warn!(actor = %principal.user_id(), project_id = %project.id(), reason, "forbidden");
        Err(TaskWorkflowError::Forbidden(reason))
    }
}
