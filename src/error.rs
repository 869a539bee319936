//! Error classification shared by every workflow service.
//!
//! Service errors keep their own variants so callers can match on precise
//! causes. The request boundary only needs to know which class of failure
//! occurred, so each service error reports an [`ErrorKind`].

use serde::Serialize;
use std::fmt;

/// Coarse failure class reported by workflow services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// The principal lacks the role or ownership the operation requires.
    Forbidden,
    /// The request carries a malformed or out-of-range value.
    InvalidInput,
    /// The request collides with existing state.
    Conflict,
    /// A workflow precondition on related records is not met.
    PreconditionFailed,
    /// Credentials or bearer token were rejected.
    Unauthorized,
    /// Persistence or infrastructure failure.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical snake-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
            Self::PreconditionFailed => "precondition_failed",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }

    /// Returns the HTTP status code a request boundary should answer with.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::InvalidInput => 400,
            Self::Conflict => 409,
            Self::PreconditionFailed => 412,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::NotFound, 404)]
    #[case(ErrorKind::Forbidden, 403)]
    #[case(ErrorKind::InvalidInput, 400)]
    #[case(ErrorKind::Conflict, 409)]
    #[case(ErrorKind::PreconditionFailed, 412)]
    #[case(ErrorKind::Unauthorized, 401)]
    #[case(ErrorKind::Internal, 500)]
    fn status_code_matches_kind(#[case] kind: ErrorKind, #[case] expected: u16) {
        assert_eq!(kind.status_code(), expected);
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(ErrorKind::PreconditionFailed.to_string(), "precondition_failed");
    }
}
