//! Platform-wide user role.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds across the whole platform.
///
/// This is distinct from the per-project membership role string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May own projects, mutate tasks, and manage users.
    Manager,
    /// May only author comments and read.
    Employee,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
