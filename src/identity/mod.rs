//! Users, credentials, and the authenticated principal.
//!
//! Registration and login live here, together with the typed [`Principal`]
//! that every other workflow receives instead of reading identity claims from
//! an untyped request context. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`] (user store, password hashing, bearer tokens)
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! [`Principal`]: domain::Principal

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
