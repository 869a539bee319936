//! Given steps for project workflow BDD scenarios.

use super::world::{ProjectWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use skilltrack::{
    comment::services::CreateCommentRequest,
    identity::services::{LoginRequest, RegisterUserRequest},
    project::services::CreateProjectRequest,
    skill::services::{AddUserSkillRequest, CreateSkillRequest},
    task::services::CreateTaskRequest,
};

const PASSWORD: &str = "scenario password";

/// Deadline used by every scenario task.
pub const DEADLINE: &str = "2026-06-30T12:00:00Z";

fn sign_in(world: &mut ProjectWorld, username: String, role: &str) -> Result<(), eyre::Report> {
    let accounts = &world.workflows.accounts;
    run_async(accounts.register(RegisterUserRequest::new(&username, PASSWORD).with_role(role)))
        .wrap_err("register scenario user")?;
    let login = run_async(accounts.login(LoginRequest::new(&username, PASSWORD)))
        .wrap_err("log in scenario user")?;
    let principal = accounts
        .authenticate(&login.token)
        .wrap_err("authenticate scenario user")?;
    world.principals.insert(username, principal);
    Ok(())
}

#[given(r#"a manager named "{username}""#)]
fn manager_named(world: &mut ProjectWorld, username: String) -> Result<(), eyre::Report> {
    sign_in(world, username, "manager")
}

#[given(r#"an employee named "{username}""#)]
fn employee_named(world: &mut ProjectWorld, username: String) -> Result<(), eyre::Report> {
    sign_in(world, username, "employee")
}

#[given(r#"a skill named "{name}""#)]
fn skill_named(world: &mut ProjectWorld, name: String) -> Result<(), eyre::Report> {
    let skill = run_async(
        world
            .workflows
            .skills
            .create_skill(CreateSkillRequest::new(&name)),
    )
    .wrap_err("create scenario skill")?;
    world.skills.insert(name, skill.id());
    Ok(())
}

#[given(r#""{username}" holds the skill "{skill}" at level {level:i32}"#)]
fn holds_skill(
    world: &mut ProjectWorld,
    username: String,
    skill: String,
    level: i32,
) -> Result<(), eyre::Report> {
    let user_id = world.principal(&username)?.user_id();
    let skill_id = world.skill(&skill)?;
    run_async(
        world
            .workflows
            .skills
            .add_user_skill(user_id, AddUserSkillRequest::new(skill_id, level)),
    )
    .wrap_err("record scenario user skill")?;
    Ok(())
}

#[given(r#""{manager}" has created the project "{name}" with members "{first}" and "{second}""#)]
fn project_with_members(
    world: &mut ProjectWorld,
    manager: String,
    name: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let principal = world.principal(&manager)?.clone();
    let members = [
        world.principal(&first)?.user_id(),
        world.principal(&second)?.user_id(),
    ];
    let project = run_async(world.workflows.projects.create_project(
        &principal,
        CreateProjectRequest::new(name).with_member_ids(members),
    ))
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#""{manager}" has created the task "{title}""#)]
fn task_created(
    world: &mut ProjectWorld,
    manager: String,
    title: String,
) -> Result<(), eyre::Report> {
    let principal = world.principal(&manager)?.clone();
    let project_id = world.project()?.project.id();
    let task = run_async(
        world
            .workflows
            .tasks
            .create_task(&principal, CreateTaskRequest::new(project_id, title, DEADLINE)),
    )
    .wrap_err("create scenario task")?;
    world.last_task = Some(task);
    Ok(())
}

#[given(r#""{author}" has commented "{text}" on the last task"#)]
fn commented(world: &mut ProjectWorld, author: String, text: String) -> Result<(), eyre::Report> {
    let principal = world.principal(&author)?.clone();
    let task_id = world.last_task()?.task.id();
    let comment = run_async(
        world
            .workflows
            .comments
            .create_comment(&principal, CreateCommentRequest::new(task_id, text)),
    )
    .wrap_err("create scenario comment")?;
    world.last_comment = Some(comment);
    Ok(())
}
