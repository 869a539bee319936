//! In-memory repository for tasks and their join rows.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    identity::domain::UserId,
    project::domain::ProjectId,
    skill::domain::SkillId,
    task::{
        domain::{Task, TaskId},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    skills: HashMap<TaskId, Vec<SkillId>>,
    assignees: HashMap<TaskId, Vec<UserId>>,
}

impl InMemoryTaskState {
    /// Returns matching tasks, most recently stored first.
    fn newest_first(&self, filter: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| filter(task))
            .cloned()
            .collect()
    }

    fn require_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        if self.tasks.contains_key(&task_id) {
            Ok(())
        } else {
            Err(TaskRepositoryError::NotFound(task_id))
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a skill from every task's required skills.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn forget_skill(&self, skill_id: SkillId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        for required in state.skills.values_mut() {
            required.retain(|id| *id != skill_id);
        }
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.insertion_order.retain(|existing| *existing != id);
        state.skills.remove(&id);
        state.assignees.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|task| task.project_id() == project_id))
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|task| {
            state
                .assignees
                .get(&task.id())
                .is_some_and(|assigned| assigned.contains(&user_id))
        }))
    }

    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|task| task.parent_task_id() == Some(parent_id)))
    }

    async fn attach_skill(&self, task_id: TaskId, skill_id: SkillId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.require_task(task_id)?;
        let required = state.skills.entry(task_id).or_default();
        if required.contains(&skill_id) {
            return Err(TaskRepositoryError::DuplicateSkill { task_id, skill_id });
        }
        required.push(skill_id);
        Ok(())
    }

    async fn skills(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<SkillId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.skills.get(&task_id).cloned().unwrap_or_default())
    }

    async fn clear_skills(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.skills.remove(&task_id);
        Ok(())
    }

    async fn attach_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.require_task(task_id)?;
        let assigned = state.assignees.entry(task_id).or_default();
        if assigned.contains(&user_id) {
            return Err(TaskRepositoryError::DuplicateAssignee { task_id, user_id });
        }
        assigned.push(user_id);
        Ok(())
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.assignees.get(&task_id).cloned().unwrap_or_default())
    }

    async fn clear_assignees(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.assignees.remove(&task_id);
        Ok(())
    }
}
