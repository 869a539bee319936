//! In-memory repository for projects and memberships.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    identity::domain::UserId,
    project::{
        domain::{Project, ProjectId, ProjectMember},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    insertion_order: Vec<ProjectId>,
    members: HashMap<ProjectId, Vec<ProjectMember>>,
}

impl InMemoryProjectState {
    fn newest_first(&self, filter: impl Fn(&Project) -> bool) -> Vec<Project> {
        self.insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.projects.get(id))
            .filter(|project| filter(project))
            .cloned()
            .collect()
    }
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.insertion_order.push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;
        state.insertion_order.retain(|existing| *existing != id);
        state.members.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_manager(&self, manager_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(move |project| project.is_managed_by(manager_id)))
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|_| true))
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let rows = state.members.entry(member.project_id()).or_default();
        if rows.iter().any(|row| row.user_id() == member.user_id()) {
            return Err(ProjectRepositoryError::DuplicateMember {
                project_id: member.project_id(),
                user_id: member.user_id(),
            });
        }
        rows.push(member.clone());
        Ok(())
    }

    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .members
            .get(&project_id)
            .and_then(|rows| rows.iter().find(|row| row.user_id() == user_id))
            .cloned())
    }

    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<ProjectMember>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.members.get(&project_id).cloned().unwrap_or_default())
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(rows) = state.members.get_mut(&project_id) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.user_id() != user_id);
        Ok(rows.len() < before)
    }

    async fn remove_members_except(
        &self,
        project_id: ProjectId,
        keep: UserId,
    ) -> ProjectRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(rows) = state.members.get_mut(&project_id) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| row.user_id() == keep);
        Ok(before - rows.len())
    }
}
