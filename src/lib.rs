//! Skilltrack: project and task tracking with skill-based assignment.
//!
//! Managers create projects and tasks, tasks name the skills they require,
//! and only users holding every required skill can be assigned. Tasks may
//! depend on a completed parent task, and users comment on tasks.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Aggregates and validation with no infrastructure dependencies
//! - **Ports**: Repository and credential traits
//! - **Adapters**: In-memory, Diesel/`PostgreSQL`, Argon2, and JWT
//!   implementations of the ports
//! - **Services**: Workflows that authorize a [`identity::domain::Principal`]
//!   and orchestrate the ports
//!
//! # Modules
//!
//! - [`identity`]: Users, roles, credentials, and the account service
//! - [`project`]: Projects and membership
//! - [`task`]: Tasks, parent dependencies, required skills, and assignees
//! - [`skill`]: Skill catalogue, user skill levels, and eligibility
//! - [`comment`]: Task comments
//! - [`app`]: Composition root wiring everything together

pub mod app;
pub mod attachment;
pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod project;
pub mod skill;
pub mod task;
pub mod telemetry;
