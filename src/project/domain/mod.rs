//! Domain model for projects and memberships.

mod error;
mod ids;
mod member;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use member::{MemberRole, ProjectMember};
pub use project::{DEFAULT_PROJECT_STATUS, NewProjectData, PersistedProjectData, Project};
