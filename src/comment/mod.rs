//! Comments users leave on tasks.
//!
//! Any authenticated user may comment on an existing task. Only the author
//! may edit or delete a comment; managers get no override.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
