//! Application services for projects and membership.

mod workflow;

pub use workflow::{
    CreateProjectRequest, ProjectView, ProjectWorkflowError, ProjectWorkflowResult,
    ProjectWorkflowService, UpdateProjectRequest,
};
