//! Skill catalogue and user skill orchestration.

use crate::{
    error::ErrorKind,
    identity::{
        domain::UserId,
        ports::{UserRepository, UserRepositoryError},
    },
    skill::{
        domain::{NewSkillData, Skill, SkillDomainError, SkillId, SkillLevel, UserSkill},
        ports::{SkillRepository, SkillRepositoryError},
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for creating a skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSkillRequest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
}

impl CreateSkillRequest {
    /// Creates a request with the skill name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Partial update of a skill; empty fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateSkillRequest {
    name: String,
    description: String,
    category: String,
}

impl UpdateSkillRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets a new category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Request payload for attaching a skill to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AddUserSkillRequest {
    skill_id: SkillId,
    level: i32,
}

impl AddUserSkillRequest {
    /// Creates a request for the skill at the given level.
    #[must_use]
    pub const fn new(skill_id: SkillId, level: i32) -> Self {
        Self { skill_id, level }
    }
}

/// User skill attachment with the denormalized skill name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSkillView {
    /// The attachment.
    #[serde(flatten)]
    pub user_skill: UserSkill,
    /// Name of the attached skill; blank when the lookup failed.
    pub skill_name: String,
}

/// Service-level errors for skill operations.
#[derive(Debug, Error)]
pub enum SkillWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SkillDomainError),
    /// Skill repository operation failed.
    #[error(transparent)]
    Repository(#[from] SkillRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The skill does not exist.
    #[error("skill not found: {0}")]
    SkillNotFound(SkillId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The user does not hold the skill.
    #[error("user {user_id} does not hold skill {skill_id}")]
    UserSkillNotFound {
        /// Requested user.
        user_id: UserId,
        /// Requested skill.
        skill_id: SkillId,
    },
}

impl SkillWorkflowError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::Repository(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::SkillNotFound(_) | Self::UserNotFound(_) | Self::UserSkillNotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}

/// Result type for skill service operations.
pub type SkillWorkflowResult<T> = Result<T, SkillWorkflowError>;

/// Skill catalogue and user skill service.
///
/// Catalogue operations carry no role check.
#[derive(Clone)]
pub struct SkillWorkflowService<S, U, C>
where
    S: SkillRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    skills: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<S, U, C> SkillWorkflowService<S, U, C>
where
    S: SkillRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new skill service.
    #[must_use]
    pub const fn new(skills: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            skills,
            users,
            clock,
        }
    }

    /// Creates a catalogue skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Domain`] for a blank name.
    pub async fn create_skill(&self, request: CreateSkillRequest) -> SkillWorkflowResult<Skill> {
        info!(name = %request.name, "creating skill");
        let skill = Skill::new(
            NewSkillData {
                name: request.name,
                description: request.description,
                category: request.category,
            },
            &*self.clock,
        )?;
        self.skills.store_skill(&skill).await.inspect_err(|err| {
            error!(error = %err, "failed to create skill");
        })?;
        info!(skill_id = %skill.id(), "skill created");
        Ok(skill)
    }

    /// Returns one skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::SkillNotFound`] for unknown identifiers.
    pub async fn get_skill(&self, id: SkillId) -> SkillWorkflowResult<Skill> {
        self.skills
            .find_skill(id)
            .await?
            .ok_or(SkillWorkflowError::SkillNotFound(id))
    }

    /// Returns every skill ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Repository`] when the lookup fails.
    pub async fn all_skills(&self) -> SkillWorkflowResult<Vec<Skill>> {
        Ok(self.skills.list_skills().await?)
    }

    /// Returns the skills in one category ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Repository`] when the lookup fails.
    pub async fn skills_by_category(&self, category: &str) -> SkillWorkflowResult<Vec<Skill>> {
        Ok(self.skills.list_skills_by_category(category).await?)
    }

    /// Applies a partial update to a skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::SkillNotFound`] for unknown identifiers.
    pub async fn update_skill(
        &self,
        id: SkillId,
        request: UpdateSkillRequest,
    ) -> SkillWorkflowResult<Skill> {
        info!(skill_id = %id, "updating skill");
        let mut skill = self.get_skill(id).await?;
        if !request.name.trim().is_empty() {
            skill.rename(request.name, &*self.clock)?;
        }
        if !request.description.is_empty() {
            skill.set_description(request.description, &*self.clock);
        }
        if !request.category.is_empty() {
            skill.set_category(request.category, &*self.clock);
        }
        self.skills.update_skill(&skill).await?;
        info!(skill_id = %id, "skill updated");
        Ok(skill)
    }

    /// Deletes a skill, every user attachment of it, and its task
    /// requirements.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::SkillNotFound`] for unknown identifiers.
    pub async fn delete_skill(&self, id: SkillId) -> SkillWorkflowResult<()> {
        info!(skill_id = %id, "deleting skill");
        self.skills.delete_skill(id).await.map_err(|err| match err {
            SkillRepositoryError::SkillNotFound(missing) => {
                SkillWorkflowError::SkillNotFound(missing)
            }
            other => other.into(),
        })?;
        info!(skill_id = %id, "skill deleted");
        Ok(())
    }

    /// Attaches a skill to a user, or changes its level when already held.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::UserNotFound`] or
    /// [`SkillWorkflowError::SkillNotFound`] for unknown identifiers and
    /// [`SkillWorkflowError::Domain`] unless `1 <= level <= 5`.
    pub async fn add_user_skill(
        &self,
        user_id: UserId,
        request: AddUserSkillRequest,
    ) -> SkillWorkflowResult<UserSkillView> {
        let skill_id = request.skill_id;
        info!(user_id = %user_id, skill_id = %skill_id, "adding user skill");

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(SkillWorkflowError::UserNotFound(user_id));
        }
        let skill = self.get_skill(skill_id).await?;
        let level = SkillLevel::new(request.level)?;

        let user_skill = if let Some(mut existing) =
            self.skills.find_user_skill(user_id, skill_id).await?
        {
            existing.set_level(level, &*self.clock);
            self.skills.update_user_skill(&existing).await?;
            info!(user_skill_id = %existing.id(), level = %level, "user skill level replaced");
            existing
        } else {
            let created = UserSkill::new(user_id, skill_id, level, &*self.clock);
            self.skills.store_user_skill(&created).await?;
            info!(user_skill_id = %created.id(), level = %level, "user skill added");
            created
        };

        Ok(UserSkillView {
            user_skill,
            skill_name: skill.name().to_owned(),
        })
    }

    /// Returns a user's skills with their names, newest first.
    ///
    /// A skill whose lookup fails is reported with a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Repository`] when the attachment lookup
    /// fails.
    pub async fn user_skills(&self, user_id: UserId) -> SkillWorkflowResult<Vec<UserSkillView>> {
        let held = self.skills.user_skills_for_user(user_id).await?;
        Ok(self.with_skill_names(held).await)
    }

    /// Returns every holder of a skill, highest level first.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::SkillNotFound`] for unknown identifiers.
    pub async fn skill_holders(
        &self,
        skill_id: SkillId,
    ) -> SkillWorkflowResult<Vec<UserSkillView>> {
        let skill = self.get_skill(skill_id).await?;
        let holders = self.skills.user_skills_for_skill(skill_id).await?;
        Ok(holders
            .into_iter()
            .map(|user_skill| UserSkillView {
                user_skill,
                skill_name: skill.name().to_owned(),
            })
            .collect())
    }

    /// Changes the level of a skill the user already holds.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Domain`] unless `1 <= level <= 5` and
    /// [`SkillWorkflowError::UserSkillNotFound`] when the user does not hold
    /// the skill.
    pub async fn update_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
        level: i32,
    ) -> SkillWorkflowResult<UserSkill> {
        info!(user_id = %user_id, skill_id = %skill_id, "updating user skill");
        let validated = SkillLevel::new(level)?;
        let mut user_skill = self
            .skills
            .find_user_skill(user_id, skill_id)
            .await?
            .ok_or(SkillWorkflowError::UserSkillNotFound { user_id, skill_id })?;
        user_skill.set_level(validated, &*self.clock);
        self.skills.update_user_skill(&user_skill).await?;
        info!(user_skill_id = %user_skill.id(), level = %validated, "user skill updated");
        Ok(user_skill)
    }

    /// Detaches a skill from a user.
    ///
    /// Removing a skill the user does not hold is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SkillWorkflowError::Repository`] when the store fails.
    pub async fn remove_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillWorkflowResult<()> {
        info!(user_id = %user_id, skill_id = %skill_id, "removing user skill");
        if !self.skills.delete_user_skill(user_id, skill_id).await? {
            warn!(user_id = %user_id, skill_id = %skill_id, "user did not hold skill");
        }
        Ok(())
    }

    async fn with_skill_names(&self, held: Vec<UserSkill>) -> Vec<UserSkillView> {
        let mut views = Vec::with_capacity(held.len());
        for user_skill in held {
            let skill_name = match self.skills.find_skill(user_skill.skill_id()).await {
                Ok(Some(skill)) => skill.name().to_owned(),
                Ok(None) => String::new(),
                Err(err) => {
                    warn!(skill_id = %user_skill.skill_id(), error = %err, "skill name lookup failed");
                    String::new()
                }
            };
            views.push(UserSkillView {
                user_skill,
                skill_name,
            });
        }
        views
    }
}
