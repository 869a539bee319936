//! Skill catalogue entry.

use super::{SkillDomainError, SkillId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Catalogue skill that tasks can require and users can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: String,
    description: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkillData {
    /// Display name; must not be blank.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Free-form grouping label.
    pub category: String,
}

/// Parameter object for reconstructing a persisted skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSkillData {
    /// Persisted skill identifier.
    pub id: SkillId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted category.
    pub category: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    /// Creates a new skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::EmptyName`] when the name is blank.
    pub fn new(data: NewSkillData, clock: &impl Clock) -> Result<Self, SkillDomainError> {
        let name = validated_name(&data.name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: SkillId::new(),
            name,
            description: data.description,
            category: data.category,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a skill from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSkillData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            category: data.category,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the skill identifier.
    #[must_use]
    pub const fn id(&self) -> SkillId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
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

    /// Renames the skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::EmptyName`] when the name is blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), SkillDomainError> {
        self.name = validated_name(&name.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the skill to another category.
    pub fn set_category(&mut self, category: impl Into<String>, clock: &impl Clock) {
        self.category = category.into();
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_name(raw: &str) -> Result<String, SkillDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SkillDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
