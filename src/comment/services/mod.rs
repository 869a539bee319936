//! Application services for task comments.

mod workflow;

pub use workflow::{
    CommentWorkflowError, CommentWorkflowResult, CommentWorkflowService, CreateCommentRequest,
};
