//! Unit tests for the task context.

mod attach_failure_tests;
mod domain_tests;
