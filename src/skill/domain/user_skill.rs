//! A user's proficiency in one skill.

use super::{SkillId, SkillLevel, UserSkillId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Attachment of a skill to a user at a given level.
///
/// At most one attachment exists per user and skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    id: UserSkillId,
    user_id: UserId,
    skill_id: SkillId,
    level: SkillLevel,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserSkillData {
    /// Persisted attachment identifier.
    pub id: UserSkillId,
    /// Persisted user identifier.
    pub user_id: UserId,
    /// Persisted skill identifier.
    pub skill_id: SkillId,
    /// Persisted level.
    pub level: SkillLevel,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserSkill {
    /// Creates a new attachment.
    #[must_use]
    pub fn new(user_id: UserId, skill_id: SkillId, level: SkillLevel, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserSkillId::new(),
            user_id,
            skill_id,
            level,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedUserSkillData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            skill_id: data.skill_id,
            level: data.level,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> UserSkillId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the attached skill.
    #[must_use]
    pub const fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    /// Returns the proficiency level.
    #[must_use]
    pub const fn level(&self) -> SkillLevel {
        self.level
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Changes the proficiency level.
    pub fn set_level(&mut self, level: SkillLevel, clock: &impl Clock) {
        self.level = level;
        self.updated_at = clock.utc();
    }
}
