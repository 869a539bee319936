//! In-memory identity adapters for tests and embedding.

mod user;

pub use user::InMemoryUserRepository;
