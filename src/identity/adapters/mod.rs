//! Adapter implementations for identity ports.

pub mod memory;
pub mod password;
pub mod postgres;
pub mod token;
