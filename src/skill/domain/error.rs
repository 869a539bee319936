//! Error types for skill domain validation.

use thiserror::Error;

/// Errors returned while constructing skill domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkillDomainError {
    /// The skill name is empty after trimming.
    #[error("skill name must not be empty")]
    EmptyName,

    /// The skill level is outside the accepted range.
    #[error("skill level must be between 1 and 5, got {0}")]
    LevelOutOfRange(i32),
}
