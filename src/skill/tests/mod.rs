//! Unit tests for the skill context.

mod service_tests;
