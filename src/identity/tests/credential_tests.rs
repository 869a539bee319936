//! Tests for the Argon2 and JWT credential adapters.

use std::sync::Arc;

use crate::identity::{
    adapters::{password::Argon2PasswordHasher, token::JwtTokenService},
    domain::{Principal, Role, UserId},
    ports::{CredentialError, PasswordHasher, TokenService},
};
use chrono::Duration;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_cost(1024, 1, 1).expect("valid argon2 parameters")
}

fn token_service(secret: &[u8], ttl: Duration) -> JwtTokenService<DefaultClock> {
    JwtTokenService::new(secret, "skilltrack", ttl, Arc::new(DefaultClock))
}

#[rstest]
fn hashed_password_verifies(hasher: Argon2PasswordHasher) {
    let hash = hasher.hash("correct horse").expect("hashing succeeds");

    assert!(hash.starts_with("$argon2id$"));
    assert_eq!(hasher.verify("correct horse", &hash), Ok(true));
    assert_eq!(hasher.verify("wrong horse", &hash), Ok(false));
}

#[rstest]
fn verify_rejects_malformed_hash(hasher: Argon2PasswordHasher) {
    let result = hasher.verify("anything", "not-a-phc-string");
    assert!(matches!(result, Err(CredentialError::MalformedHash(_))));
}

#[test]
fn invalid_cost_parameters_are_rejected() {
    let result = Argon2PasswordHasher::with_cost(1, 0, 0);
    assert!(matches!(result, Err(CredentialError::Hashing(_))));
}

#[test]
fn issued_token_verifies_to_same_principal() {
    let service = token_service(b"unit-test-secret", Duration::hours(1));
    let principal = Principal::new(UserId::new(), "dana", Role::Manager);

    let token = service.issue(&principal).expect("token issues");
    let verified = service.verify(&token).expect("token verifies");

    assert_eq!(verified, principal);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let issuer = token_service(b"secret-one", Duration::hours(1));
    let verifier = token_service(b"secret-two", Duration::hours(1));
    let token = issuer
        .issue(&Principal::new(UserId::new(), "erin", Role::Employee))
        .expect("token issues");

    assert!(matches!(
        verifier.verify(&token),
        Err(CredentialError::InvalidToken(_))
    ));
}

#[test]
fn expired_token_is_rejected() {
    let service = token_service(b"unit-test-secret", Duration::hours(-2));
    let token = service
        .issue(&Principal::new(UserId::new(), "frank", Role::Employee))
        .expect("token issues");

    assert!(matches!(
        service.verify(&token),
        Err(CredentialError::InvalidToken(_))
    ));
}
