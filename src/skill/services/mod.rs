//! Application services for the skill catalogue and user skill levels.

mod workflow;

pub use workflow::{
    AddUserSkillRequest, CreateSkillRequest, SkillWorkflowError, SkillWorkflowResult,
    SkillWorkflowService, UpdateSkillRequest, UserSkillView,
};
