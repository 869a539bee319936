//! Adapter implementations for skill ports.

pub mod memory;
pub mod postgres;
