//! Port contracts for users and credentials.
//!
//! Ports define infrastructure-agnostic interfaces used by the account
//! service and, for user lookups, by the other workflows.

pub mod credentials;
pub mod repository;

pub use credentials::{CredentialError, PasswordHasher, TokenService};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
