//! Account service: registration, login, token authentication, and user
//! management.

use crate::{
    error::ErrorKind,
    identity::{
        domain::{
            IdentityDomainError, NewUserData, ParseRoleError, Principal, Role, User, UserId,
            Username,
        },
        ports::{CredentialError, PasswordHasher, TokenService, UserRepository, UserRepositoryError},
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Prefix accepted in front of bearer tokens.
const BEARER_PREFIX: &str = "Bearer ";

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    username: String,
    password: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: String,
}

impl RegisterUserRequest {
    /// Creates a request with the required credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: String::new(),
            email: String::new(),
            role: String::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the platform role; an empty role registers an employee.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// Request payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Platform role of the authenticated user.
    pub role: Role,
}

/// Partial update of a user; absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

impl UpdateUserRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new login name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets a new password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a new platform role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// The requested role is unknown.
    #[error(transparent)]
    Role(#[from] ParseRoleError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Hashing or signing failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// The login name is already registered.
    #[error("user already exists: {0}")]
    UsernameTaken(String),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The bearer token was rejected.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// The principal may not perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl AccountError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Role(_) => ErrorKind::InvalidInput,
            Self::Repository(err) => err.kind(),
            Self::Credential(_) => ErrorKind::Internal,
            Self::UsernameTaken(_) => ErrorKind::Conflict,
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::InvalidCredentials | Self::InvalidToken(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Registration, login, and user management service.
#[derive(Clone)]
pub struct AccountService<R, H, T, C>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<C>,
}

impl<R, H, T, C> AccountService<R, H, T, C>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    /// Registers a new user.
    ///
    /// An empty role registers an employee.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UsernameTaken`] for a duplicate login name,
    /// [`AccountError::Domain`] or [`AccountError::Role`] for invalid input,
    /// and [`AccountError::Repository`] or [`AccountError::Credential`] for
    /// infrastructure failures.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountResult<User> {
        let username = Username::new(request.username)?;
        info!(username = %username, "registering user");

        if request.password.is_empty() {
            return Err(IdentityDomainError::EmptyPassword.into());
        }
        let role = if request.role.trim().is_empty() {
            Role::Employee
        } else {
            Role::try_from(request.role.as_str())?
        };

        if self.users.find_by_username(&username).await?.is_some() {
            warn!(username = %username, "user already exists");
            return Err(AccountError::UsernameTaken(username.as_str().to_owned()));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            NewUserData {
                username,
                password_hash,
                role,
                name: request.name,
                email: request.email,
            },
            &*self.clock,
        );
        self.users.store(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateUsername(name) => {
                AccountError::UsernameTaken(name.as_str().to_owned())
            }
            other => other.into(),
        })?;

        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when the user is unknown
    /// or the password does not match.
    pub async fn login(&self, request: LoginRequest) -> AccountResult<LoginResponse> {
        let Ok(username) = Username::new(request.username) else {
            return Err(AccountError::InvalidCredentials);
        };
        info!(username = %username, "login attempt");

        let Some(user) = self.users.find_by_username(&username).await? else {
            warn!(username = %username, "login for unknown user");
            return Err(AccountError::InvalidCredentials);
        };
        if !self.hasher.verify(&request.password, user.password_hash())? {
            warn!(user_id = %user.id(), "invalid password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.principal())?;
        info!(user_id = %user.id(), "login successful");
        Ok(LoginResponse {
            token,
            role: user.role(),
        })
    }

    /// Verifies a bearer token and returns the principal it carries.
    ///
    /// A leading `Bearer ` scheme is accepted and stripped.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidToken`] when the token is rejected.
    pub fn authenticate(&self, token: &str) -> AccountResult<Principal> {
        let raw = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        self.tokens.verify(raw).map_err(|err| {
            warn!(error = %err, "rejected bearer token");
            AccountError::InvalidToken(err.to_string())
        })
    }

    /// Lists every user. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Forbidden`] for non-managers.
    pub async fn list_users(&self, principal: &Principal) -> AccountResult<Vec<User>> {
        require_manager(principal, "only managers can list users")?;
        Ok(self.users.list().await?)
    }

    /// Returns one user. Allowed for managers only.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Forbidden`] for non-managers and
    /// [`AccountError::UserNotFound`] for unknown identifiers.
    pub async fn get_user(&self, principal: &Principal, id: UserId) -> AccountResult<User> {
        require_manager(principal, "only managers can view users")?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound(id))
    }

    /// Applies a partial update to a user.
    ///
    /// Managers may update anyone; other users only themselves. Changing the
    /// role requires a manager.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UserNotFound`], [`AccountError::Forbidden`],
    /// [`AccountError::UsernameTaken`], or validation errors.
    pub async fn update_user(
        &self,
        principal: &Principal,
        id: UserId,
        request: UpdateUserRequest,
    ) -> AccountResult<User> {
        info!(user_id = %id, actor = %principal.user_id(), "updating user");
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound(id))?;
        if !principal.is_manager() && !principal.is(id) {
            return Err(AccountError::Forbidden("only managers can update other users"));
        }

        if let Some(raw) = non_empty(request.username) {
            let username = Username::new(raw)?;
            if username != *user.username() {
                if let Some(existing) = self.users.find_by_username(&username).await? {
                    if existing.id() != id {
                        return Err(AccountError::UsernameTaken(username.as_str().to_owned()));
                    }
                }
                user.rename(username, &*self.clock);
            }
        }
        if let Some(name) = non_empty(request.name) {
            user.set_name(name, &*self.clock);
        }
        if let Some(email) = non_empty(request.email) {
            user.set_email(email, &*self.clock);
        }
        if let Some(password) = non_empty(request.password) {
            let password_hash = self.hasher.hash(&password)?;
            user.set_password_hash(password_hash, &*self.clock);
        }
        if let Some(raw_role) = non_empty(request.role) {
            let role = Role::try_from(raw_role.as_str())?;
            if role != user.role() {
                require_manager(principal, "only managers can change roles")?;
                user.set_role(role, &*self.clock);
            }
        }

        self.users.update(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateUsername(name) => {
                AccountError::UsernameTaken(name.as_str().to_owned())
            }
            other => other.into(),
        })?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Deletes a user. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Forbidden`] for non-managers and
    /// [`AccountError::UserNotFound`] for unknown identifiers.
    pub async fn delete_user(&self, principal: &Principal, id: UserId) -> AccountResult<()> {
        require_manager(principal, "only managers can delete users")?;
        info!(user_id = %id, actor = %principal.user_id(), "deleting user");
        self.users.delete(id).await.map_err(|err| match err {
            UserRepositoryError::NotFound(missing) => AccountError::UserNotFound(missing),
            other => other.into(),
        })?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

fn require_manager(principal: &Principal, reason: &'static str) -> AccountResult<()> {
    if principal.is_manager() {
        Ok(())
    } else {
        warn!(actor = %principal.user_id(), reason, "forbidden");
        Err(AccountError::Forbidden(reason))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}
