//! Skill catalogue, user skill levels, and assignment eligibility.
//!
//! Skills are free-form catalogue entries grouped by category. Users attach
//! skills at a level from 1 to 5, and the task workflow uses those
//! attachments to decide whether a candidate may be assigned to a task that
//! requires a given set of skills. The module follows hexagonal architecture:
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
