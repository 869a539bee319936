//! When steps for project workflow BDD scenarios.

use super::{
    given::DEADLINE,
    world::{ProjectWorld, run_async},
};
use rstest_bdd_macros::when;
use skilltrack::task::services::CreateTaskRequest;

#[when(r#""{actor}" creates the task "{title}" requiring "{skill}" for "{first}" and "{second}""#)]
fn create_staffed_task(
    world: &mut ProjectWorld,
    actor: String,
    title: String,
    skill: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let principal = world.principal(&actor)?.clone();
    let request = CreateTaskRequest::new(world.project()?.project.id(), title, DEADLINE)
        .with_skill_ids([world.skill(&skill)?])
        .with_assignee_ids([
            world.principal(&first)?.user_id(),
            world.principal(&second)?.user_id(),
        ]);
    match run_async(world.workflows.tasks.create_task(&principal, request)) {
        Ok(task) => world.last_task = Some(task),
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{actor}" creates a subtask "{title}" under the last task"#)]
fn create_subtask(
    world: &mut ProjectWorld,
    actor: String,
    title: String,
) -> Result<(), eyre::Report> {
    let principal = world.principal(&actor)?.clone();
    let parent = world.last_task()?.task.id();
    let request = CreateTaskRequest::new(world.project()?.project.id(), title, DEADLINE)
        .with_parent(parent);
    match run_async(world.workflows.tasks.create_task(&principal, request)) {
        Ok(task) => world.last_task = Some(task),
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{actor}" edits the last comment to "{text}""#)]
fn edit_comment(world: &mut ProjectWorld, actor: String, text: String) -> Result<(), eyre::Report> {
    let principal = world.principal(&actor)?.clone();
    let comment_id = world
        .last_comment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing comment in scenario world"))?
        .id();
    match run_async(
        world
            .workflows
            .comments
            .update_comment(&principal, comment_id, &text),
    ) {
        Ok(comment) => world.last_comment = Some(comment),
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}
