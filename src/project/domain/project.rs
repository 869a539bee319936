//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Status given to projects created without one.
pub const DEFAULT_PROJECT_STATUS: &str = "active";

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    manager_id: UserId,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectData {
    /// Display name; must not be blank.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owning manager.
    pub manager_id: UserId,
    /// Free-form status; blank becomes [`DEFAULT_PROJECT_STATUS`].
    pub status: String,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted owning manager.
    pub manager_id: UserId,
    /// Persisted status.
    pub status: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the name is blank.
    pub fn new(data: NewProjectData, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let name = validated_name(&data.name)?;
        let status = if data.status.trim().is_empty() {
            DEFAULT_PROJECT_STATUS.to_owned()
        } else {
            data.status
        };
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name,
            description: data.description,
            manager_id: data.manager_id,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            manager_id: data.manager_id,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
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

    /// Returns the owning manager.
    #[must_use]
    pub const fn manager_id(&self) -> UserId {
        self.manager_id
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
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

    /// Returns `true` when `user_id` owns the project.
    #[must_use]
    pub fn is_managed_by(&self, user_id: UserId) -> bool {
        self.manager_id == user_id
    }

    /// Renames the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the name is blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.name = validated_name(&name.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Replaces the status.
    pub fn set_status(&mut self, status: impl Into<String>, clock: &impl Clock) {
        self.status = status.into();
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_name(raw: &str) -> Result<String, ProjectDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
