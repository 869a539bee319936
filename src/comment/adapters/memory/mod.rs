//! In-memory comment adapter.

mod comment;

pub use comment::InMemoryCommentRepository;
