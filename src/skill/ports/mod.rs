//! Port contracts for skills and user skill levels.

pub mod repository;

pub use repository::{SkillRepository, SkillRepositoryError, SkillRepositoryResult};
