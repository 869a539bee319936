//! In-memory repository for skills and user skill attachments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    identity::domain::UserId,
    skill::{
        domain::{Skill, SkillId, UserSkill},
        ports::{SkillRepository, SkillRepositoryError, SkillRepositoryResult},
    },
    task::adapters::memory::InMemoryTaskRepository,
};

/// Thread-safe in-memory skill repository.
///
/// When linked to a task store, deleting a skill also removes it from every
/// task's required skills.
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillRepository {
    state: Arc<RwLock<InMemorySkillState>>,
    dependent_tasks: Option<InMemoryTaskRepository>,
}

#[derive(Debug, Default)]
struct InMemorySkillState {
    skills: HashMap<SkillId, Skill>,
    user_skills: HashMap<(UserId, SkillId), UserSkill>,
}

impl InMemorySkillRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose skill deletions also detach the
    /// skill from tasks in `tasks`.
    #[must_use]
    pub fn linked_to(tasks: InMemoryTaskRepository) -> Self {
        Self {
            state: Arc::default(),
            dependent_tasks: Some(tasks),
        }
    }
}

fn lock_error(err: impl ToString) -> SkillRepositoryError {
    SkillRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_name(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by(|left, right| left.name().cmp(right.name()));
    skills
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn store_skill(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.skills.contains_key(&skill.id()) {
            return Err(SkillRepositoryError::DuplicateSkill(skill.id()));
        }
        state.skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn update_skill(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .skills
            .get_mut(&skill.id())
            .ok_or(SkillRepositoryError::SkillNotFound(skill.id()))?;
        *stored = skill.clone();
        Ok(())
    }

    async fn delete_skill(&self, id: SkillId) -> SkillRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            state
                .skills
                .remove(&id)
                .ok_or(SkillRepositoryError::SkillNotFound(id))?;
            state.user_skills.retain(|(_, skill_id), _| *skill_id != id);
        }
        if let Some(tasks) = &self.dependent_tasks {
            tasks
                .forget_skill(id)
                .map_err(SkillRepositoryError::persistence)?;
        }
        Ok(())
    }

    async fn find_skill(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.skills.get(&id).cloned())
    }

    async fn list_skills(&self) -> SkillRepositoryResult<Vec<Skill>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_by_name(state.skills.values().cloned().collect()))
    }

    async fn list_skills_by_category(&self, category: &str) -> SkillRepositoryResult<Vec<Skill>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_by_name(
            state
                .skills
                .values()
                .filter(|skill| skill.category() == category)
                .cloned()
                .collect(),
        ))
    }

    async fn store_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = (user_skill.user_id(), user_skill.skill_id());
        if state.user_skills.contains_key(&key) {
            return Err(SkillRepositoryError::DuplicateUserSkill {
                user_id: key.0,
                skill_id: key.1,
            });
        }
        state.user_skills.insert(key, user_skill.clone());
        Ok(())
    }

    async fn update_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .user_skills
            .get_mut(&(user_skill.user_id(), user_skill.skill_id()))
            .filter(|existing| existing.id() == user_skill.id())
            .ok_or(SkillRepositoryError::UserSkillNotFound(user_skill.id()))?;
        *stored = user_skill.clone();
        Ok(())
    }

    async fn find_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Option<UserSkill>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.user_skills.get(&(user_id, skill_id)).cloned())
    }

    async fn user_skills_for_user(&self, user_id: UserId) -> SkillRepositoryResult<Vec<UserSkill>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut held: Vec<UserSkill> = state
            .user_skills
            .values()
            .filter(|user_skill| user_skill.user_id() == user_id)
            .cloned()
            .collect();
        held.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(held)
    }

    async fn user_skills_for_skill(
        &self,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Vec<UserSkill>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut holders: Vec<UserSkill> = state
            .user_skills
            .values()
            .filter(|user_skill| user_skill.skill_id() == skill_id)
            .cloned()
            .collect();
        holders.sort_by(|left, right| right.level().cmp(&left.level()));
        Ok(holders)
    }

    async fn delete_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.user_skills.remove(&(user_id, skill_id)).is_some())
    }
}
