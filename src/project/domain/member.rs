//! Project membership.

use super::ProjectId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form role a user holds within one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRole(String);

impl MemberRole {
    /// Role held by the owning manager.
    pub const PROJECT_MANAGER: &'static str = "project_manager";
    /// Role given to members when none is requested.
    pub const DEVELOPER: &'static str = "developer";

    /// Creates a role from a requested value; blank values become
    /// [`Self::DEVELOPER`].
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::developer()
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The owning manager's role.
    #[must_use]
    pub fn project_manager() -> Self {
        Self(Self::PROJECT_MANAGER.to_owned())
    }

    /// The default member role.
    #[must_use]
    pub fn developer() -> Self {
        Self(Self::DEVELOPER.to_owned())
    }

    /// Returns the role as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        Self::developer()
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membership of one user in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    project_id: ProjectId,
    user_id: UserId,
    role: MemberRole,
    joined_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Creates a membership that starts now.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        project_id: ProjectId,
        user_id: UserId,
        role: MemberRole,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at,
        }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> &MemberRole {
        &self.role
    }

    /// Returns when the user joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
