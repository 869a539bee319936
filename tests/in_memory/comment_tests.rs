//! Comments on tasks created through the workflows.

use crate::in_memory::helpers::{DEADLINE, sign_in, workflows};
use rstest::rstest;
use skilltrack::{
    app::InMemoryWorkflows, comment::services::CreateCommentRequest, error::ErrorKind,
    project::services::CreateProjectRequest, task::services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_cannot_edit_an_employee_comment(workflows: InMemoryWorkflows) {
    let manager = sign_in(&workflows, "mia", "manager").await;
    let employee = sign_in(&workflows, "dan", "employee").await;
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

    let comment = workflows
        .comments
        .create_comment(
            &employee,
            CreateCommentRequest::new(task.task.id(), "Blocked on review"),
        )
        .await
        .expect("anyone can comment");
    let err = workflows
        .comments
        .update_comment(&manager, comment.id(), "Unblocked")
        .await
        .expect_err("only the author may edit");

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let comments = workflows
        .comments
        .comments_for_task(task.task.id())
        .await
        .expect("list comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(
        comments.first().map(|stored| stored.text().to_owned()),
        Some("Blocked on review".to_owned())
    );
}
