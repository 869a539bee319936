//! User aggregate and validated username.

use super::{IdentityDomainError, Principal, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(50)` column.
const MAX_USERNAME_LENGTH: usize = 50;

/// Trimmed, non-empty login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUsername`] when the value is empty
    /// after trimming or [`IdentityDomainError::UsernameTooLong`] when it
    /// exceeds 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyUsername);
        }
        if normalized.chars().count() > MAX_USERNAME_LENGTH {
            return Err(IdentityDomainError::UsernameTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User aggregate root.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: Username,
    #[serde(skip_serializing)]
    password_hash: String,
    role: Role,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserData {
    /// Validated login name.
    pub username: Username,
    /// Encoded password hash produced by a password hasher.
    pub password_hash: String,
    /// Platform role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted login name.
    pub username: Username,
    /// Persisted password hash.
    pub password_hash: String,
    /// Persisted platform role.
    pub role: Role,
    /// Persisted display name.
    pub name: String,
    /// Persisted contact email.
    pub email: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a newly registered user.
    #[must_use]
    pub fn new(data: NewUserData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
            name: data.name,
            email: data.email,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
            name: data.name,
            email: data.email,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the encoded password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the platform role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
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

    /// Returns the principal this user acts as once authenticated.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.username.as_str(), self.role)
    }

    /// Changes the login name.
    pub fn rename(&mut self, username: Username, clock: &impl Clock) {
        self.username = username;
        self.touch(clock);
    }

    /// Changes the display name.
    pub fn set_name(&mut self, name: impl Into<String>, clock: &impl Clock) {
        self.name = name.into();
        self.touch(clock);
    }

    /// Changes the contact email.
    pub fn set_email(&mut self, email: impl Into<String>, clock: &impl Clock) {
        self.email = email.into();
        self.touch(clock);
    }

    /// Changes the platform role.
    pub fn set_role(&mut self, role: Role, clock: &impl Clock) {
        self.role = role;
        self.touch(clock);
    }

    /// Replaces the password hash.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>, clock: &impl Clock) {
        self.password_hash = password_hash.into();
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
