//! Task aggregate root.

use super::{Progress, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskType};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    deadline: DateTime<Utc>,
    status: TaskStatus,
    progress: Progress,
    hours: u32,
    priority: TaskPriority,
    #[serde(rename = "type")]
    task_type: TaskType,
    parent_task_id: Option<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning project.
    pub project_id: ProjectId,
    /// Title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Due date.
    pub deadline: DateTime<Utc>,
    /// Estimated hours.
    pub hours: u32,
    /// Priority.
    pub priority: TaskPriority,
    /// Kind of work.
    pub task_type: TaskType,
    /// Completed task this one depends on.
    pub parent_task_id: Option<TaskId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted due date.
    pub deadline: DateTime<Utc>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted hour estimate.
    pub hours: u32,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted kind of work.
    pub task_type: TaskType,
    /// Persisted parent task.
    pub parent_task_id: Option<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Largest hour estimate the task store can hold.
    pub const MAX_HOURS: u32 = i32::MAX.unsigned_abs();

    /// Creates a pending task with no progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank and
    /// [`TaskDomainError::HoursOutOfRange`] above [`Task::MAX_HOURS`].
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = validated_title(&data.title)?;
        let hours = validated_hours(data.hours)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id: data.project_id,
            title,
            description: data.description,
            deadline: data.deadline,
            status: TaskStatus::Pending,
            progress: Progress::default(),
            hours,
            priority: data.priority,
            task_type: data.task_type,
            parent_task_id: data.parent_task_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            status: data.status,
            progress: data.progress,
            hours: data.hours,
            priority: data.priority,
            task_type: data.task_type,
            parent_task_id: data.parent_task_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the hour estimate.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the kind of work.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<TaskId> {
        self.parent_task_id
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

    /// Returns `true` once the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed)
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn retitle(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.title = validated_title(&title.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the due date.
    pub fn set_deadline(&mut self, deadline: DateTime<Utc>, clock: &impl Clock) {
        self.deadline = deadline;
        self.touch(clock);
    }

    /// Replaces the hour estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::HoursOutOfRange`] above
    /// [`Task::MAX_HOURS`].
    pub fn set_hours(&mut self, hours: u32, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.hours = validated_hours(hours)?;
        self.touch(clock);
        Ok(())
    }

    /// Changes the priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Changes the kind of work.
    pub fn set_task_type(&mut self, task_type: TaskType, clock: &impl Clock) {
        self.task_type = task_type;
        self.touch(clock);
    }

    /// Changes the status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Records progress.
    pub fn set_progress(&mut self, progress: Progress, clock: &impl Clock) {
        self.progress = progress;
        self.touch(clock);
    }

    /// Sets or clears the parent task.
    pub fn set_parent(&mut self, parent_task_id: Option<TaskId>, clock: &impl Clock) {
        self.parent_task_id = parent_task_id;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

const fn validated_hours(hours: u32) -> Result<u32, TaskDomainError> {
    if hours > Task::MAX_HOURS {
        return Err(TaskDomainError::HoursOutOfRange(hours));
    }
    Ok(hours)
}
