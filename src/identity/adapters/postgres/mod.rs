//! `PostgreSQL` adapters for user persistence.

mod models;
mod repository;
mod schema;

pub use repository::{IdentityPgPool, PostgresUserRepository};
