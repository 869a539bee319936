//! Diesel row models for task persistence.

use super::schema::{task_assignees, task_skills, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row for task records, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Due date.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Completion percentage.
    pub progress: i32,
    /// Estimated hours.
    pub hours: i32,
    /// Priority.
    pub priority: String,
    /// Kind of work.
    pub task_type: String,
    /// Optional parent task.
    pub parent_task_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for required-skill rows; the timestamp takes its column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_skills)]
pub struct NewTaskSkillRow {
    /// Task.
    pub task_id: uuid::Uuid,
    /// Required skill.
    pub skill_id: uuid::Uuid,
}

/// Insert model for assignee rows; the timestamp takes its column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_assignees)]
pub struct NewTaskAssigneeRow {
    /// Task.
    pub task_id: uuid::Uuid,
    /// Assigned user.
    pub user_id: uuid::Uuid,
}
