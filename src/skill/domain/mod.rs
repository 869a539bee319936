//! Domain model for skills, user skill levels, and eligibility.

mod eligibility;
mod error;
mod ids;
mod level;
mod skill;
mod user_skill;

pub use eligibility::covers_required_skills;
pub use error::SkillDomainError;
pub use ids::{SkillId, UserSkillId};
pub use level::SkillLevel;
pub use skill::{NewSkillData, PersistedSkillData, Skill};
pub use user_skill::{PersistedUserSkillData, UserSkill};
