//! Application services for tasks, dependencies, and assignment.

mod workflow;

pub use workflow::{
    CreateTaskRequest, TaskView, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
    UpdateTaskRequest,
};
