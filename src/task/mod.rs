//! Tasks, their dependencies, required skills, and assignees.
//!
//! Tasks belong to a project and may depend on a parent task. A task can only
//! be created under a completed parent, and a task with dependents cannot be
//! deleted. Only users holding every required skill can be assigned. Only the
//! immediate parent is checked; longer dependency cycles are not detected.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
