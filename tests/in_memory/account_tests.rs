//! Account flows through the composition root.

use crate::in_memory::helpers::{sign_in, workflows};
use rstest::rstest;
use skilltrack::{
    app::InMemoryWorkflows,
    error::ErrorKind,
    identity::{domain::Role, services::LoginRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_token_authenticates_back_to_same_principal(workflows: InMemoryWorkflows) {
    let principal = sign_in(&workflows, "mia", "manager").await;

    assert_eq!(principal.username(), "mia");
    assert_eq!(principal.role(), Role::Manager);
    let user = workflows
        .accounts
        .get_user(&principal, principal.user_id())
        .await
        .expect("managers can read users");
    assert_eq!(user.id(), principal.user_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_unauthorized(workflows: InMemoryWorkflows) {
    sign_in(&workflows, "dan", "employee").await;

    let err = workflows
        .accounts
        .login(LoginRequest::new("dan", "wrong"))
        .await
        .expect_err("wrong password");

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.kind().status_code(), 401);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employees_cannot_list_users(workflows: InMemoryWorkflows) {
    let employee = sign_in(&workflows, "dan", "employee").await;

    let err = workflows
        .accounts
        .list_users(&employee)
        .await
        .expect_err("manager only");

    assert_eq!(err.kind(), ErrorKind::Forbidden);
}
