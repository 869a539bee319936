//! Shared world state for project workflow BDD scenarios.

use std::collections::HashMap;

use rstest::fixture;
use skilltrack::{
    app::InMemoryWorkflows,
    comment::domain::Comment,
    config::AuthConfig,
    error::ErrorKind,
    identity::{adapters::password::Argon2PasswordHasher, domain::Principal},
    project::services::ProjectView,
    skill::domain::SkillId,
    task::services::TaskView,
};

/// Scenario world for project workflow behaviour tests.
pub struct ProjectWorld {
    pub workflows: InMemoryWorkflows,
    pub principals: HashMap<String, Principal>,
    pub skills: HashMap<String, SkillId>,
    pub project: Option<ProjectView>,
    pub last_task: Option<TaskView>,
    pub last_comment: Option<Comment>,
    pub last_error: Option<ErrorKind>,
}

impl ProjectWorld {
    /// Creates a world over fresh in-memory storage.
    ///
    /// # Panics
    ///
    /// Panics if the fixed Argon2 cost parameters are rejected.
    #[must_use]
    pub fn new() -> Self {
        let auth = AuthConfig {
            jwt_secret: "scenario-secret".to_owned(),
            ..AuthConfig::default()
        };
        let hasher = Argon2PasswordHasher::with_cost(1024, 1, 1).expect("valid argon2 cost");

        Self {
            workflows: InMemoryWorkflows::in_memory(&auth, hasher),
            principals: HashMap::new(),
            skills: HashMap::new(),
            project: None,
            last_task: None,
            last_comment: None,
            last_error: None,
        }
    }

    /// Looks up a signed-in principal by username.
    pub fn principal(&self, username: &str) -> Result<&Principal, eyre::Report> {
        self.principals
            .get(username)
            .ok_or_else(|| eyre::eyre!("no signed-in user named {username}"))
    }

    /// Looks up a skill identifier by name.
    pub fn skill(&self, name: &str) -> Result<SkillId, eyre::Report> {
        self.skills
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no skill named {name}"))
    }

    /// Returns the project created in the background.
    pub fn project(&self) -> Result<&ProjectView, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the most recently created task.
    pub fn last_task(&self) -> Result<&TaskView, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ProjectWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectWorld {
    ProjectWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
