//! Domain model for task comments.

mod comment;

pub use comment::{Comment, CommentDomainError, CommentId, PersistedCommentData};
