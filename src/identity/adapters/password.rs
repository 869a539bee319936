//! Argon2id password hashing adapter.

use crate::identity::ports::{CredentialError, PasswordHasher};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Password hasher producing PHC-encoded Argon2id hashes.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the library's recommended cost parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Creates a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] when the parameters are outside
    /// the ranges Argon2 accepts.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::Hashing(err.to_string()))
    }

    fn verify(&self, password: &str, encoded_hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(encoded_hash)
            .map_err(|err| CredentialError::MalformedHash(err.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::Hashing(err.to_string())),
        }
    }
}
