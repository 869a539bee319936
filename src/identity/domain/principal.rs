//! Authenticated principal threaded through workflow calls.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Identity of the user performing a request.
///
/// Produced once per request by the account service from a verified bearer
/// token and passed explicitly to every workflow operation that needs to
/// authorize the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
    username: String,
    role: Role,
}

impl Principal {
    /// Creates a principal from verified identity data.
    #[must_use]
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the acting user's platform role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the principal holds the manager role.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }

    /// Returns `true` when the principal is the given user.
    #[must_use]
    pub fn is(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
