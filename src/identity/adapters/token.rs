//! HS256 JSON Web Token adapter.

use crate::identity::{
    domain::{Principal, Role, UserId},
    ports::{CredentialError, TokenService},
};
use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Claims carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    username: String,
    role: String,
    iat: i64,
    exp: i64,
    iss: String,
}

/// Token service signing and verifying HS256 JWTs with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService<C>
where
    C: Clock + Send + Sync,
{
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
    clock: Arc<C>,
}

impl<C> JwtTokenService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a token service.
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration, clock: Arc<C>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl<C> TokenService for JwtTokenService<C>
where
    C: Clock + Send + Sync,
{
    fn issue(&self, principal: &Principal) -> Result<String, CredentialError> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            sub: principal.user_id().into_inner(),
            username: principal.username().to_owned(),
            role: principal.role().as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| CredentialError::Signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Principal, CredentialError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|err| CredentialError::InvalidToken(err.to_string()))?;
        let role = Role::try_from(data.claims.role.as_str())
            .map_err(|err| CredentialError::InvalidToken(err.to_string()))?;
        Ok(Principal::new(
            UserId::from_uuid(data.claims.sub),
            data.claims.username,
            role,
        ))
    }
}
