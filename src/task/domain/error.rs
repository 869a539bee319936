//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or parsing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The deadline is not an RFC 3339 timestamp.
    #[error("invalid deadline format: {0}")]
    InvalidDeadline(String),

    /// The progress value is outside 0 to 100.
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i32),

    /// The hour estimate exceeds what the task store can hold.
    #[error("hours must be at most 2147483647, got {0}")]
    HoursOutOfRange(u32),

    /// The status value is unknown.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// The priority value is unknown.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// The task type value is unknown.
    #[error("unknown task type: {0}")]
    UnknownType(String),
}
