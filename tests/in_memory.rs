//! In-memory integration tests for the wired workflows.
//!
//! Tests are organized into modules by functionality:
//! - `account_tests`: Registration, login, and token authentication
//! - `assignment_tests`: Projects, tasks, skills, and eligibility end to end
//! - `comment_tests`: Comments on tasks created through the workflows

mod in_memory {
    pub mod helpers;

    mod account_tests;
    mod assignment_tests;
    mod comment_tests;
}
