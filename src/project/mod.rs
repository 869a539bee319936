//! Projects and their membership.
//!
//! A project is owned by the manager who created it. That manager always
//! holds a `project_manager` membership and cannot be removed; other members
//! join as developers unless a role is given. The module follows hexagonal
//! architecture:
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
