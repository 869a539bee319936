//! In-memory project adapters for tests and embedding.

mod project;

pub use project::InMemoryProjectRepository;
