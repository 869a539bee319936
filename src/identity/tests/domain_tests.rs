//! Domain validation tests for users, roles, and principals.

use crate::identity::domain::{
    IdentityDomainError, NewUserData, ParseRoleError, Role, User, UserId, Username,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("manager", Role::Manager)]
#[case(" Employee ", Role::Employee)]
#[case("MANAGER", Role::Manager)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw), Ok(expected));
}

#[test]
fn role_rejects_unknown_values() {
    assert_eq!(
        Role::try_from("admin"),
        Err(ParseRoleError("admin".to_owned()))
    );
}

#[test]
fn username_is_trimmed() {
    let username = Username::new("  alice ").expect("valid username");
    assert_eq!(username.as_str(), "alice");
}

#[rstest]
#[case("")]
#[case("   ")]
fn username_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(IdentityDomainError::EmptyUsername));
}

#[test]
fn username_rejects_values_longer_than_column() {
    let raw = "a".repeat(51);
    assert!(matches!(
        Username::new(raw),
        Err(IdentityDomainError::UsernameTooLong(_))
    ));
}

#[test]
fn principal_reflects_user_identity_and_role() {
    let user = User::new(
        NewUserData {
            username: Username::new("bob").expect("valid username"),
            password_hash: "hash".to_owned(),
            role: Role::Manager,
            name: "Bob".to_owned(),
            email: "bob@example.com".to_owned(),
        },
        &DefaultClock,
    );

    let principal = user.principal();

    assert_eq!(principal.user_id(), user.id());
    assert_eq!(principal.username(), "bob");
    assert!(principal.is_manager());
    assert!(principal.is(user.id()));
    assert!(!principal.is(UserId::new()));
}

#[test]
fn serialized_user_omits_password_hash() {
    let user = User::new(
        NewUserData {
            username: Username::new("carol").expect("valid username"),
            password_hash: "secret-hash".to_owned(),
            role: Role::Employee,
            name: "Carol".to_owned(),
            email: String::new(),
        },
        &DefaultClock,
    );

    let json = serde_json::to_value(&user).expect("user serializes");

    assert!(json.get("password_hash").is_none());
    assert_eq!(json.get("role").and_then(|v| v.as_str()), Some("employee"));
}
