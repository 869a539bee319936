//! In-memory skill adapters for tests and embedding.

mod skill;

pub use skill::InMemorySkillRepository;
