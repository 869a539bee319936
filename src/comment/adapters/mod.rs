//! Adapter implementations for comment ports.

pub mod memory;
pub mod postgres;
