//! `PostgreSQL` adapters for skill persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSkillRepository, SkillPgPool};
