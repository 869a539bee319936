//! Deadline parsing.

use super::TaskDomainError;
use chrono::{DateTime, Utc};

/// Parses an RFC 3339 timestamp such as `2026-03-01T17:00:00+02:00`.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDeadline`] when the value is not a valid
/// RFC 3339 timestamp.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| TaskDomainError::InvalidDeadline(raw.to_owned()))
}
