//! Port contracts for comment persistence.

mod repository;

pub use repository::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
