//! Composition root wiring repositories, credentials, and services.

use crate::{
    comment::{
        adapters::{memory::InMemoryCommentRepository, postgres::PostgresCommentRepository},
        ports::CommentRepository,
        services::CommentWorkflowService,
    },
    config::{AppConfig, AuthConfig},
    identity::{
        adapters::{
            memory::InMemoryUserRepository, password::Argon2PasswordHasher,
            postgres::PostgresUserRepository, token::JwtTokenService,
        },
        ports::UserRepository,
        services::AccountService,
    },
    project::{
        adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
        ports::ProjectRepository,
        services::ProjectWorkflowService,
    },
    skill::{
        adapters::{memory::InMemorySkillRepository, postgres::PostgresSkillRepository},
        ports::SkillRepository,
        services::SkillWorkflowService,
    },
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::TaskRepository,
        services::TaskWorkflowService,
    },
};
use chrono::Duration;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Shared `PostgreSQL` pool handed to every Diesel adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// No database URL was configured for `PostgreSQL` wiring.
    #[error("database.url must be set for PostgreSQL storage")]
    MissingDatabaseUrl,
    /// The connection pool could not be built.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// One repository per bounded context.
#[derive(Debug)]
pub struct Repositories<U, P, S, T, M> {
    /// User accounts.
    pub users: Arc<U>,
    /// Projects and membership.
    pub projects: Arc<P>,
    /// Skill catalogue and user skills.
    pub skills: Arc<S>,
    /// Tasks with their join rows.
    pub tasks: Arc<T>,
    /// Task comments.
    pub comments: Arc<M>,
}

/// Every workflow service, sharing repositories and one clock.
pub struct Workflows<U, P, S, T, M, C>
where
    U: UserRepository,
    P: ProjectRepository,
    S: SkillRepository,
    T: TaskRepository,
    M: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Registration, login, and user management.
    pub accounts: AccountService<U, Argon2PasswordHasher, JwtTokenService<C>, C>,
    /// Projects and membership.
    pub projects: ProjectWorkflowService<P, U, C>,
    /// Skill catalogue and user skills.
    pub skills: SkillWorkflowService<S, U, C>,
    /// Tasks, dependencies, and assignment.
    pub tasks: TaskWorkflowService<T, P, S, U, C>,
    /// Task comments.
    pub comments: CommentWorkflowService<M, T, C>,
}

/// Workflows over in-memory storage.
pub type InMemoryWorkflows = Workflows<
    InMemoryUserRepository,
    InMemoryProjectRepository,
    InMemorySkillRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    DefaultClock,
>;

/// Workflows over `PostgreSQL` storage.
pub type PostgresWorkflows = Workflows<
    PostgresUserRepository,
    PostgresProjectRepository,
    PostgresSkillRepository,
    PostgresTaskRepository,
    PostgresCommentRepository,
    DefaultClock,
>;

impl<U, P, S, T, M, C> Workflows<U, P, S, T, M, C>
where
    U: UserRepository,
    P: ProjectRepository,
    S: SkillRepository,
    T: TaskRepository,
    M: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Wires services over the given repositories.
    #[must_use]
    pub fn from_parts(
        repositories: Repositories<U, P, S, T, M>,
        hasher: Argon2PasswordHasher,
        auth: &AuthConfig,
        clock: Arc<C>,
    ) -> Self {
        let Repositories {
            users,
            projects,
            skills,
            tasks,
            comments,
        } = repositories;
        let tokens = JwtTokenService::new(
            auth.jwt_secret.as_bytes(),
            auth.issuer.clone(),
            Duration::hours(auth.token_ttl_hours),
            Arc::clone(&clock),
        );
        Self {
            accounts: AccountService::new(
                Arc::clone(&users),
                Arc::new(hasher),
                Arc::new(tokens),
                Arc::clone(&clock),
            ),
            projects: ProjectWorkflowService::new(
                Arc::clone(&projects),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            skills: SkillWorkflowService::new(
                Arc::clone(&skills),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            tasks: TaskWorkflowService::new(
                Arc::clone(&tasks),
                projects,
                skills,
                users,
                Arc::clone(&clock),
            ),
            comments: CommentWorkflowService::new(comments, tasks, clock),
        }
    }
}

impl InMemoryWorkflows {
    /// Wires services over fresh in-memory repositories.
    #[must_use]
    pub fn in_memory(auth: &AuthConfig, hasher: Argon2PasswordHasher) -> Self {
        info!("wiring workflows over in-memory storage");
        let tasks = InMemoryTaskRepository::new();
        Self::from_parts(
            Repositories {
                users: Arc::new(InMemoryUserRepository::new()),
                projects: Arc::new(InMemoryProjectRepository::new()),
                skills: Arc::new(InMemorySkillRepository::linked_to(tasks.clone())),
                tasks: Arc::new(tasks),
                comments: Arc::new(InMemoryCommentRepository::new()),
            },
            hasher,
            auth,
            Arc::new(DefaultClock),
        )
    }
}

impl PostgresWorkflows {
    /// Builds a pool from `config.database` and wires services over it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingDatabaseUrl`] without a URL and
    /// [`AppError::Pool`] when the pool cannot connect.
    pub fn postgres(config: &AppConfig) -> Result<Self, AppError> {
        if config.database.url.is_empty() {
            return Err(AppError::MissingDatabaseUrl);
        }
        let pool = Pool::builder()
            .max_size(config.database.max_connections)
            .build(ConnectionManager::<PgConnection>::new(&config.database.url))?;
        info!(
            max_connections = config.database.max_connections,
            "wiring workflows over PostgreSQL storage"
        );
        Ok(Self::from_parts(
            Repositories {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
                skills: Arc::new(PostgresSkillRepository::new(pool.clone())),
                tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pool)),
            },
            Argon2PasswordHasher::new(),
            &config.auth,
            Arc::new(DefaultClock),
        ))
    }
}
