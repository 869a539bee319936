//! Credential ports: password hashing and bearer tokens.

use crate::identity::domain::Principal;
use thiserror::Error;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing encoded string.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] when the hash cannot be computed.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Checks a plaintext password against an encoded hash.
    ///
    /// Returns `Ok(false)` for a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedHash`] when the stored hash cannot
    /// be parsed.
    fn verify(&self, password: &str, encoded_hash: &str) -> Result<bool, CredentialError>;
}

/// Bearer token issue and verification.
pub trait TokenService: Send + Sync {
    /// Issues a signed token carrying the principal's identity and role.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Signing`] when the token cannot be signed.
    fn issue(&self, principal: &Principal) -> Result<String, CredentialError>;

    /// Verifies a token and returns the principal it carries.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidToken`] when the signature, issuer,
    /// expiry, or claims are invalid.
    fn verify(&self, token: &str) -> Result<Principal, CredentialError>;
}

/// Errors returned by credential adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A stored password hash could not be parsed.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// The token was rejected.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}
