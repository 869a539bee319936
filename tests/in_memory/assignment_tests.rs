//! Project, task, and skill workflows sharing one set of repositories.

use crate::in_memory::helpers::{DEADLINE, sign_in, workflows};
use rstest::rstest;
use skilltrack::{
    app::InMemoryWorkflows,
    attachment::SkipReason,
    error::ErrorKind,
    project::services::CreateProjectRequest,
    skill::services::{AddUserSkillRequest, CreateSkillRequest},
    task::services::{CreateTaskRequest, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_plans_and_staffs_a_project(workflows: InMemoryWorkflows) {
    let manager = sign_in(&workflows, "mia", "manager").await;
    let alice = sign_in(&workflows, "alice", "employee").await;
    let bob = sign_in(&workflows, "bob", "employee").await;

    let project = workflows
        .projects
        .create_project(
            &manager,
            CreateProjectRequest::new("Apollo").with_member_ids([alice.user_id(), bob.user_id()]),
        )
        .await
        .expect("project should be created");
    assert_eq!(
        project.member_ids,
        vec![manager.user_id(), alice.user_id(), bob.user_id()]
    );

    let rust = workflows
        .skills
        .create_skill(CreateSkillRequest::new("Rust").with_category("language"))
        .await
        .expect("skill should be created");
    workflows
        .skills
        .add_user_skill(alice.user_id(), AddUserSkillRequest::new(rust.id(), 4))
        .await
        .expect("alice learns rust");

    let design = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Design", DEADLINE).with_hours(8),
        )
        .await
        .expect("design task");
    let premature = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Build", DEADLINE)
                .with_parent(design.task.id()),
        )
        .await
        .expect_err("design is not completed yet");
    assert_eq!(premature.kind().status_code(), 412);

    workflows
        .tasks
        .update_task(
            &manager,
            design.task.id(),
            UpdateTaskRequest::new().with_status("completed").with_progress(100),
        )
        .await
        .expect("design completes");
    let build = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Build", DEADLINE)
                .with_parent(design.task.id())
                .with_skill_ids([rust.id()])
                .with_assignee_ids([alice.user_id(), bob.user_id()]),
        )
        .await
        .expect("build task");

    assert_eq!(build.assignee_ids, vec![alice.user_id()]);
    assert_eq!(
        build
            .skipped_assignees
            .iter()
            .map(|entry| (entry.id, entry.reason.clone()))
            .collect::<Vec<_>>(),
        vec![(bob.user_id(), SkipReason::Ineligible)]
    );

    let alice_tasks = workflows
        .tasks
        .tasks_by_user(alice.user_id())
        .await
        .expect("alice's tasks");
    assert_eq!(alice_tasks.len(), 1);

    let blocked = workflows
        .tasks
        .delete_task(&manager, design.task.id())
        .await
        .expect_err("build depends on design");
    assert_eq!(blocked.kind(), ErrorKind::PreconditionFailed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employees_cannot_touch_tasks_of_projects_they_do_not_manage(
    workflows: InMemoryWorkflows,
) {
    let manager = sign_in(&workflows, "mia", "manager").await;
    let employee = sign_in(&workflows, "eve", "employee").await;
    let project = workflows
        .projects
        .create_project(&manager, CreateProjectRequest::new("Apollo"))
        .await
        .expect("project should be created");
    let task = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Design", DEADLINE),
        )
        .await
        .expect("task should be created");

    let create_err = workflows
        .tasks
        .create_task(
            &employee,
            CreateTaskRequest::new(project.project.id(), "Sneak", DEADLINE),
        )
        .await
        .expect_err("forbidden");
    let delete_err = workflows
        .tasks
        .delete_task(&employee, task.task.id())
        .await
        .expect_err("forbidden");

    assert_eq!(create_err.kind(), ErrorKind::Forbidden);
    assert_eq!(delete_err.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_skill_drops_it_from_task_requirements(workflows: InMemoryWorkflows) {
    let manager = sign_in(&workflows, "mia", "manager").await;
    let alice = sign_in(&workflows, "alice", "employee").await;
    let project = workflows
        .projects
        .create_project(&manager, CreateProjectRequest::new("Apollo"))
        .await
        .expect("project should be created");
    let rust = workflows
        .skills
        .create_skill(CreateSkillRequest::new("Rust"))
        .await
        .expect("skill should be created");
    let task = workflows
        .tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(project.project.id(), "Build", DEADLINE)
                .with_skill_ids([rust.id()]),
        )
        .await
        .expect("task should be created");
    assert_eq!(task.skill_ids, vec![rust.id()]);

    workflows
        .skills
        .delete_skill(rust.id())
        .await
        .expect("skill should be deleted");

    let fetched = workflows
        .tasks
        .get_task(task.task.id())
        .await
        .expect("task still exists");
    assert!(fetched.skill_ids.is_empty());

    let staffed = workflows
        .tasks
        .update_task(
            &manager,
            task.task.id(),
            UpdateTaskRequest::new().with_assignee_ids([alice.user_id()]),
        )
        .await
        .expect("assignment should succeed");
    assert_eq!(staffed.assignee_ids, vec![alice.user_id()]);
    assert!(staffed.skipped_assignees.is_empty());
}
