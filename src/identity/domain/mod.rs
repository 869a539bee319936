//! Domain model for users and authenticated principals.

mod error;
mod ids;
mod principal;
mod role;
mod user;

pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use principal::Principal;
pub use role::Role;
pub use user::{NewUserData, PersistedUserData, User, Username};
