//! Constraint violations surface as typed repository errors.

use crate::postgres::helpers::TestSchema;
use mockable::DefaultClock;
use skilltrack::{
    identity::{
        adapters::postgres::PostgresUserRepository,
        domain::{NewUserData, Role, User, Username},
        ports::{UserRepository, UserRepositoryError},
    },
    project::{
        adapters::postgres::PostgresProjectRepository,
        domain::{MemberRole, NewProjectData, Project, ProjectMember},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    skill::{
        adapters::postgres::PostgresSkillRepository,
        domain::{NewSkillData, Skill, SkillLevel, UserSkill},
        ports::{SkillRepository, SkillRepositoryError},
    },
};

fn user(username: &str) -> eyre::Result<User> {
    Ok(User::new(
        NewUserData {
            username: Username::new(username)?,
            password_hash: "hash".to_owned(),
            role: Role::Manager,
            name: String::new(),
            email: String::new(),
        },
        &DefaultClock,
    ))
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_rows_map_to_duplicate_errors() -> eyre::Result<()> {
    let Some(schema) = TestSchema::create()? else {
        return Ok(());
    };
    let pool = schema.pool()?;
    let users = PostgresUserRepository::new(pool.clone());
    let projects = PostgresProjectRepository::new(pool.clone());
    let skills = PostgresSkillRepository::new(pool);

    let mia = user("mia")?;
    users.store(&mia).await?;
    let clash = users.store(&user("mia")?).await;
    assert!(matches!(clash, Err(UserRepositoryError::DuplicateUsername(_))));

    let project = Project::new(
        NewProjectData {
            name: "Apollo".to_owned(),
            description: String::new(),
            manager_id: mia.id(),
            status: String::new(),
        },
        &DefaultClock,
    )?;
    projects.store(&project).await?;
    let member = ProjectMember::new(
        project.id(),
        mia.id(),
        MemberRole::project_manager(),
        &DefaultClock,
    );
    projects.add_member(&member).await?;
    let again = projects.add_member(&member).await;
    assert!(matches!(
        again,
        Err(ProjectRepositoryError::DuplicateMember { .. })
    ));

    let skill = Skill::new(
        NewSkillData {
            name: "Rust".to_owned(),
            description: String::new(),
            category: String::new(),
        },
        &DefaultClock,
    )?;
    skills.store_skill(&skill).await?;
    let level = SkillLevel::new(2)?;
    skills
        .store_user_skill(&UserSkill::new(mia.id(), skill.id(), level, &DefaultClock))
        .await?;
    let second = skills
        .store_user_skill(&UserSkill::new(mia.id(), skill.id(), level, &DefaultClock))
        .await;
    assert!(matches!(
        second,
        Err(SkillRepositoryError::DuplicateUserSkill { .. })
    ));
    Ok(())
}
