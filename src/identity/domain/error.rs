//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the persisted column width.
    #[error("username '{0}' exceeds 50 characters")]
    UsernameTooLong(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned while parsing a platform role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
