//! Unit tests for the project context.

mod attach_failure_tests;
