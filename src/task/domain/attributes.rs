//! Task status, priority, type, and progress.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, work not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished. Dependent tasks may be created.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(TaskDomainError::UnknownStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be done soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Parses an optional request value; blank means the default.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownPriority`] for unknown values.
    pub fn parse_or_default(value: &str) -> Result<Self, TaskDomainError> {
        if value.trim().is_empty() {
            Ok(Self::default())
        } else {
            Self::try_from(value)
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// New functionality.
    Feature,
    /// Defect fix.
    Bug,
    /// General work item.
    #[default]
    Task,
    /// Umbrella for related tasks.
    Epic,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Task => "task",
            Self::Epic => "epic",
        }
    }

    /// Parses an optional request value; blank means the default.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownType`] for unknown values.
    pub fn parse_or_default(value: &str) -> Result<Self, TaskDomainError> {
        if value.trim().is_empty() {
            Ok(Self::default())
        } else {
            Self::try_from(value)
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "feature" => Ok(Self::Feature),
            "bug" => Ok(Self::Bug),
            "task" => Ok(Self::Task),
            "epic" => Ok(Self::Epic),
            _ => Err(TaskDomainError::UnknownType(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion percentage from 0 to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Progress(u8);

impl Progress {
    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] unless
    /// `0 <= value <= 100`.
    pub fn new(value: i32) -> Result<Self, TaskDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(Self)
            .ok_or(TaskDomainError::ProgressOutOfRange(value))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Progress {
    type Error = TaskDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for i32 {
    fn from(progress: Progress) -> Self {
        Self::from(progress.0)
    }
}
