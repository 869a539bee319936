//! A store that rejects join rows must not fail task creation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

use crate::{
    attachment::SkipReason,
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::{NewUserData, Role, User, UserId, Username},
        ports::UserRepository,
    },
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{NewProjectData, Project, ProjectId},
        ports::ProjectRepository,
    },
    skill::{
        adapters::memory::InMemorySkillRepository,
        domain::{NewSkillData, Skill, SkillId},
        ports::SkillRepository,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
        services::{CreateTaskRequest, TaskWorkflowService},
    },
};

/// Delegates to the in-memory store but refuses every join row.
#[derive(Default)]
struct RejectingJoinRows {
    inner: InMemoryTaskRepository,
}

fn rejected() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("join table unavailable"))
}

#[async_trait]
impl TaskRepository for RejectingJoinRows {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.store(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.update(task).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_project(project_id).await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_assignee(user_id).await
    }

    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_children(parent_id).await
    }

    async fn attach_skill(&self, _task_id: TaskId, _skill_id: SkillId) -> TaskRepositoryResult<()> {
        Err(rejected())
    }

    async fn skills(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<SkillId>> {
        self.inner.skills(task_id).await
    }

    async fn clear_skills(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.clear_skills(task_id).await
    }

    async fn attach_assignee(
        &self,
        _task_id: TaskId,
        _user_id: UserId,
    ) -> TaskRepositoryResult<()> {
        Err(rejected())
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        self.inner.assignees(task_id).await
    }

    async fn clear_assignees(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.clear_assignees(task_id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_join_rows_are_reported_and_task_persists() {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let skills = Arc::new(InMemorySkillRepository::new());
    let tasks = Arc::new(RejectingJoinRows::default());
    let service = TaskWorkflowService::new(
        Arc::clone(&tasks),
        Arc::clone(&projects),
        Arc::clone(&skills),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );

    let manager = User::new(
        NewUserData {
            username: Username::new("mia").expect("valid username"),
            password_hash: "hash".to_owned(),
            role: Role::Manager,
            name: "Mia".to_owned(),
            email: String::new(),
        },
        &DefaultClock,
    );
    users.store(&manager).await.expect("user should store");
    let project = Project::new(
        NewProjectData {
            name: "Apollo".to_owned(),
            description: String::new(),
            manager_id: manager.id(),
            status: String::new(),
        },
        &DefaultClock,
    )
    .expect("valid project");
    projects.store(&project).await.expect("project should store");
    let skill = Skill::new(
        NewSkillData {
            name: "Rust".to_owned(),
            description: String::new(),
            category: String::new(),
        },
        &DefaultClock,
    )
    .expect("valid skill");
    skills.store_skill(&skill).await.expect("skill should store");

    let view = service
        .create_task(
            &manager.principal(),
            CreateTaskRequest::new(project.id(), "Resilient", "2026-03-01T17:00:00Z")
                .with_skill_ids([skill.id()])
                .with_assignee_ids([manager.id()]),
        )
        .await
        .expect("attachment failures never fail creation");

    assert!(view.skill_ids.is_empty());
    assert!(view.assignee_ids.is_empty());
    assert!(matches!(
        view.skipped_skills.first().map(|entry| &entry.reason),
        Some(SkipReason::Persistence(_))
    ));
    assert!(matches!(
        view.skipped_assignees.first().map(|entry| &entry.reason),
        Some(SkipReason::Persistence(_))
    ));
    assert!(
        tasks
            .find_by_id(view.task.id())
            .await
            .expect("lookup")
            .is_some()
    );
}
