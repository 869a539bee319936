//! Port contracts for projects and membership.

pub mod repository;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
