//! Unit tests for the identity context.

mod credential_tests;
mod domain_tests;
