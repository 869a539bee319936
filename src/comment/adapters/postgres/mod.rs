//! `PostgreSQL` adapter for comment persistence.

mod repository;
mod schema;

pub use repository::{CommentPgPool, PostgresCommentRepository};
