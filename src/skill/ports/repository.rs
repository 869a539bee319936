//! Repository port for the skill catalogue and user skill attachments.

use crate::{
    error::ErrorKind,
    identity::domain::UserId,
    skill::domain::{Skill, SkillId, UserSkill, UserSkillId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for skill repository operations.
pub type SkillRepositoryResult<T> = Result<T, SkillRepositoryError>;

/// Skill persistence contract.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Stores a new skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::DuplicateSkill`] when the identifier
    /// already exists.
    async fn store_skill(&self, skill: &Skill) -> SkillRepositoryResult<()>;

    /// Persists changes to an existing skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::SkillNotFound`] when the skill does
    /// not exist.
    async fn update_skill(&self, skill: &Skill) -> SkillRepositoryResult<()>;

    /// Deletes a skill together with every user attachment of it.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::SkillNotFound`] when the skill does
    /// not exist.
    async fn delete_skill(&self, id: SkillId) -> SkillRepositoryResult<()>;

    /// Finds a skill by identifier.
    async fn find_skill(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>>;

    /// Returns every skill ordered by name.
    async fn list_skills(&self) -> SkillRepositoryResult<Vec<Skill>>;

    /// Returns the skills in one category ordered by name.
    async fn list_skills_by_category(&self, category: &str) -> SkillRepositoryResult<Vec<Skill>>;

    /// Stores a new user attachment.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::DuplicateUserSkill`] when the user
    /// already holds the skill.
    async fn store_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()>;

    /// Persists a changed level.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::UserSkillNotFound`] when the
    /// attachment does not exist.
    async fn update_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()>;

    /// Finds the attachment of one skill to one user.
    async fn find_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Option<UserSkill>>;

    /// Returns a user's attachments, newest first.
    async fn user_skills_for_user(&self, user_id: UserId) -> SkillRepositoryResult<Vec<UserSkill>>;

    /// Returns every attachment of a skill, highest level first.
    async fn user_skills_for_skill(
        &self,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Vec<UserSkill>>;

    /// Deletes the attachment of one skill to one user.
    ///
    /// Returns `false` when no attachment existed.
    async fn delete_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<bool>;
}

/// Errors returned by skill repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SkillRepositoryError {
    /// A skill with the same identifier already exists.
    #[error("duplicate skill identifier: {0}")]
    DuplicateSkill(SkillId),

    /// The user already holds the skill.
    #[error("user {user_id} already holds skill {skill_id}")]
    DuplicateUserSkill {
        /// Owning user.
        user_id: UserId,
        /// Attached skill.
        skill_id: SkillId,
    },

    /// The skill was not found.
    #[error("skill not found: {0}")]
    SkillNotFound(SkillId),

    /// The attachment was not found.
    #[error("user skill not found: {0}")]
    UserSkillNotFound(UserSkillId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SkillRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateSkill(_) | Self::DuplicateUserSkill { .. } => ErrorKind::Conflict,
            Self::SkillNotFound(_) | Self::UserSkillNotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}
