//! Workflows end to end over `PostgreSQL`.

use crate::postgres::helpers::TestSchema;
use skilltrack::{
    attachment::SkipReason,
    comment::services::CreateCommentRequest,
    error::ErrorKind,
    identity::services::{LoginRequest, RegisterUserRequest},
    project::services::CreateProjectRequest,
    skill::services::{AddUserSkillRequest, CreateSkillRequest},
    task::services::{CreateTaskRequest, UpdateTaskRequest},
};

const DEADLINE: &str = "2026-06-30T12:00:00Z";

#[tokio::test(flavor = "multi_thread")]
async fn assignment_workflow_round_trips_through_postgres() -> eyre::Result<()> {
    let Some(schema) = TestSchema::create()? else {
        return Ok(());
    };
    let workflows = schema.workflows()?;

    let manager_user = workflows
        .accounts
        .register(RegisterUserRequest::new("mia", "pw-mia").with_role("manager"))
        .await?;
    let alice_user = workflows
        .accounts
        .register(RegisterUserRequest::new("alice", "pw-alice"))
        .await?;
    let bob_user = workflows
        .accounts
        .register(RegisterUserRequest::new("bob", "pw-bob"))
        .await?;
    let login = workflows
        .accounts
        .login(LoginRequest::new("mia", "pw-mia"))
        .await?;
    let manager = workflows.accounts.authenticate(&login.token)?;
    assert_eq!(manager.user_id(), manager_user.id());

    let project = workflows
        .projects
        .create_project(
            &manager,
            CreateProjectRequest::new("Apollo")
                .with_member_ids([manager.user_id(), alice_user.id(), bob_user.id()]),
        )
        .await?;
    assert_eq!(
        project.member_ids,
        vec![manager.user_id(), alice_user.id(), bob_user.id()]
    );

    let rust = workflows
        .skills
        .create_skill(CreateSkillRequest::new("Rust"))
        .await?;
    workflows
        .skills
        .add_user_skill(alice_user.id(), AddUserSkillRequest::new(rust.id(), 5))
        .await?;

    let design = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Design", DEADLINE),
        )
        .await?;
    workflows
        .tasks
        .update_task(
            &manager,
            design.task.id(),
            UpdateTaskRequest::new().with_status("completed"),
        )
        .await?;
    let build = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Build", DEADLINE)
                .with_parent(design.task.id())
                .with_skill_ids([rust.id()])
                .with_assignee_ids([alice_user.id(), bob_user.id()]),
        )
        .await?;
    assert_eq!(build.skill_ids, vec![rust.id()]);
    assert_eq!(build.assignee_ids, vec![alice_user.id()]);
    assert_eq!(
        build.skipped_assignees.first().map(|entry| entry.reason.clone()),
        Some(SkipReason::Ineligible)
    );

    let fetched = workflows.tasks.get_task(build.task.id()).await?;
    assert_eq!(fetched.task, build.task);
    assert_eq!(fetched.assignee_ids, vec![alice_user.id()]);
    let assigned = workflows.tasks.tasks_by_user(alice_user.id()).await?;
    assert_eq!(assigned.len(), 1);

    let blocked = workflows
        .tasks
        .delete_task(&manager, design.task.id())
        .await
        .expect_err("build depends on design");
    assert_eq!(blocked.kind(), ErrorKind::PreconditionFailed);

    let alice = workflows
        .accounts
        .authenticate(
            &workflows
                .accounts
                .login(LoginRequest::new("alice", "pw-alice"))
                .await?
                .token,
        )?;
    let first = workflows
        .comments
        .create_comment(&alice, CreateCommentRequest::new(build.task.id(), "Starting"))
        .await?;
    let second = workflows
        .comments
        .create_comment(&manager, CreateCommentRequest::new(build.task.id(), "Thanks"))
        .await?;
    let ids: Vec<_> = workflows
        .comments
        .comments_for_task(build.task.id())
        .await?
        .iter()
        .map(skilltrack::comment::domain::Comment::id)
        .collect();
    assert_eq!(ids, vec![first.id(), second.id()]);

    workflows.tasks.delete_task(&manager, build.task.id()).await?;
    workflows.tasks.delete_task(&manager, design.task.id()).await?;
    Ok(())
}
