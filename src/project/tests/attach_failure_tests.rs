//! A store that rejects the manager's membership row must not drop the
//! manager from the created project's members.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

use crate::{
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::{NewUserData, Role, User, UserId, Username},
        ports::UserRepository,
    },
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{MemberRole, Project, ProjectId, ProjectMember},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
        services::{CreateProjectRequest, ProjectWorkflowService},
    },
};

/// Delegates to the in-memory store but refuses `project_manager` rows.
#[derive(Default)]
struct RejectingManagerRow {
    inner: InMemoryProjectRepository,
}

#[async_trait]
impl ProjectRepository for RejectingManagerRow {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.inner.store(project).await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.inner.update(project).await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_manager(&self, manager_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.find_by_manager(manager_id).await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.list().await
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        if member.role() == &MemberRole::project_manager() {
            return Err(ProjectRepositoryError::persistence(std::io::Error::other(
                "membership table unavailable",
            )));
        }
        self.inner.add_member(member).await
    }

    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>> {
        self.inner.find_member(project_id, user_id).await
    }

    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<ProjectMember>> {
        self.inner.members(project_id).await
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        self.inner.remove_member(project_id, user_id).await
    }

    async fn remove_members_except(
        &self,
        project_id: ProjectId,
        keep: UserId,
    ) -> ProjectRepositoryResult<usize> {
        self.inner.remove_members_except(project_id, keep).await
    }
}

async fn stored_user(users: &InMemoryUserRepository, username: &str, role: Role) -> User {
    let user = User::new(
        NewUserData {
            username: Username::new(username).expect("valid username"),
            password_hash: "hash".to_owned(),
            role,
            name: String::new(),
            email: String::new(),
        },
        &DefaultClock,
    );
    users.store(&user).await.expect("user should store");
    user
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_is_reported_as_member_when_manager_row_fails() {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = ProjectWorkflowService::new(
        Arc::new(RejectingManagerRow::default()),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    let manager = stored_user(&users, "mia", Role::Manager).await;
    let alice = stored_user(&users, "alice", Role::Employee).await;

    let view = service
        .create_project(
            &manager.principal(),
            CreateProjectRequest::new("Apollo").with_member_ids([alice.id()]),
        )
        .await
        .expect("project creation should succeed");

    assert_eq!(view.member_ids, vec![manager.id(), alice.id()]);
    assert!(view.skipped_members.is_empty());
    assert_eq!(view.project.manager_id(), manager.id());
}
