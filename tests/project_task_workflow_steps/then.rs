//! Then steps for project workflow BDD scenarios.

use super::world::ProjectWorld;
use rstest_bdd_macros::then;
use skilltrack::attachment::SkipReason;

#[then(r#"the task is assigned to "{username}""#)]
fn task_assigned_to(world: &ProjectWorld, username: String) -> Result<(), eyre::Report> {
    let expected = world.principal(&username)?.user_id();
    let task = world.last_task()?;
    if task.assignee_ids != vec![expected] {
        return Err(eyre::eyre!(
            "expected only {username} assigned, found {:?}",
            task.assignee_ids
        ));
    }
    Ok(())
}

#[then(r#""{username}" is skipped as ineligible"#)]
fn skipped_as_ineligible(world: &ProjectWorld, username: String) -> Result<(), eyre::Report> {
    let user_id = world.principal(&username)?.user_id();
    let task = world.last_task()?;
    let skipped = task
        .skipped_assignees
        .iter()
        .any(|entry| entry.id == user_id && entry.reason == SkipReason::Ineligible);
    if !skipped {
        return Err(eyre::eyre!(
            "expected {username} skipped as ineligible, found {:?}",
            task.skipped_assignees
        ));
    }
    Ok(())
}

#[then(r#"the request fails with "{kind}""#)]
fn request_fails_with(world: &ProjectWorld, kind: String) -> Result<(), eyre::Report> {
    let actual = world
        .last_error
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    if actual.as_str() != kind {
        return Err(eyre::eyre!("expected {kind} failure, found {actual}"));
    }
    Ok(())
}
