//! Shared fixtures for in-memory workflow tests.

use rstest::fixture;
use skilltrack::{
    app::InMemoryWorkflows,
    config::AuthConfig,
    identity::{
        adapters::password::Argon2PasswordHasher, domain::Principal,
        services::{LoginRequest, RegisterUserRequest},
    },
};

/// Deadline used by every task in these tests.
pub const DEADLINE: &str = "2026-06-30T12:00:00Z";

/// Workflows with a cheap hasher and a fixed test secret.
#[fixture]
pub fn workflows() -> InMemoryWorkflows {
    let auth = AuthConfig {
        jwt_secret: "integration-secret".to_owned(),
        ..AuthConfig::default()
    };
    let hasher = Argon2PasswordHasher::with_cost(1024, 1, 1).expect("valid argon2 cost");
    InMemoryWorkflows::in_memory(&auth, hasher)
}

/// Registers a user, logs in, and authenticates the issued token.
pub async fn sign_in(workflows: &InMemoryWorkflows, username: &str, role: &str) -> Principal {
    workflows
        .accounts
        .register(RegisterUserRequest::new(username, "correct horse").with_role(role))
        .await
        .expect("registration should succeed");
    let login = workflows
        .accounts
        .login(LoginRequest::new(username, "correct horse"))
        .await
        .expect("login should succeed");
    workflows
        .accounts
        .authenticate(&login.token)
        .expect("issued token should authenticate")
}
