//! Service orchestration tests for the skill catalogue and user skills.

use std::sync::Arc;

use crate::{
    error::ErrorKind,
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::{NewUserData, Role, User, UserId, Username},
        ports::UserRepository,
    },
    skill::{
        adapters::memory::InMemorySkillRepository,
        domain::{Skill, SkillId},
        services::{
            AddUserSkillRequest, CreateSkillRequest, SkillWorkflowError, SkillWorkflowService,
            UpdateSkillRequest,
        },
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    SkillWorkflowService<InMemorySkillRepository, InMemoryUserRepository, DefaultClock>;

struct Harness {
    service: TestService,
    users: Arc<InMemoryUserRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = SkillWorkflowService::new(
        Arc::new(InMemorySkillRepository::new()),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    Harness { service, users }
}

async fn employee(users: &InMemoryUserRepository, username: &str) -> UserId {
    let user = User::new(
        NewUserData {
            username: Username::new(username).expect("valid username"),
            password_hash: "hash".to_owned(),
            role: Role::Employee,
            name: username.to_owned(),
            email: String::new(),
        },
        &DefaultClock,
    );
    users.store(&user).await.expect("user should store");
    user.id()
}

async fn skill(service: &TestService, name: &str, category: &str) -> Skill {
    service
        .create_skill(CreateSkillRequest::new(name).with_category(category))
        .await
        .expect("skill should be created")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catalogue_lists_by_name_and_category(harness: Harness) {
    skill(&harness.service, "SQL", "data").await;
    skill(&harness.service, "Go", "backend").await;
    skill(&harness.service, "Rust", "backend").await;

    let all = harness.service.all_skills().await.expect("list skills");
    let backend = harness
        .service
        .skills_by_category("backend")
        .await
        .expect("list category");

    let names: Vec<&str> = all.iter().map(Skill::name).collect();
    assert_eq!(names, vec!["Go", "Rust", "SQL"]);
    assert_eq!(backend.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_skill_leaves_empty_fields_unchanged(harness: Harness) {
    let created = skill(&harness.service, "Rust", "backend").await;

    let updated = harness
        .service
        .update_skill(
            created.id(),
            UpdateSkillRequest::new().with_description("Systems language"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.name(), "Rust");
    assert_eq!(updated.category(), "backend");
    assert_eq!(updated.description(), "Systems language");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_skill_reports_not_found(harness: Harness) {
    let missing = SkillId::new();

    let fetched = harness.service.get_skill(missing).await;
    let deleted = harness.service.delete_skill(missing).await;

    assert!(matches!(fetched, Err(SkillWorkflowError::SkillNotFound(id)) if id == missing));
    assert_eq!(deleted.map_err(|err| err.kind()), Err(ErrorKind::NotFound));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_user_skill_upserts_existing_pair(harness: Harness) {
    let user_id = employee(&harness.users, "alice").await;
    let rust = skill(&harness.service, "Rust", "backend").await;

    let first = harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), 2))
        .await
        .expect("first attach");
    let second = harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), 4))
        .await
        .expect("second attach");
    let held = harness
        .service
        .user_skills(user_id)
        .await
        .expect("list user skills");

    assert_eq!(first.user_skill.id(), second.user_skill.id());
    assert_eq!(second.user_skill.level().value(), 4);
    assert_eq!(second.skill_name, "Rust");
    assert_eq!(held.len(), 1);
}

#[rstest]
#[case(0)]
#[case(6)]
#[tokio::test(flavor = "multi_thread")]
async fn add_user_skill_rejects_out_of_range_level(harness: Harness, #[case] level: i32) {
    let user_id = employee(&harness.users, "bob").await;
    let rust = skill(&harness.service, "Rust", "backend").await;

    let err = harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), level))
        .await
        .expect_err("level should be rejected");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_user_skill_requires_existing_user_and_skill(harness: Harness) {
    let user_id = employee(&harness.users, "carol").await;
    let rust = skill(&harness.service, "Rust", "backend").await;

    let unknown_user = harness
        .service
        .add_user_skill(UserId::new(), AddUserSkillRequest::new(rust.id(), 3))
        .await;
    let unknown_skill = harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(SkillId::new(), 3))
        .await;

    assert!(matches!(unknown_user, Err(SkillWorkflowError::UserNotFound(_))));
    assert!(matches!(unknown_skill, Err(SkillWorkflowError::SkillNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skill_holders_are_ordered_by_level(harness: Harness) {
    let novice = employee(&harness.users, "dave").await;
    let expert = employee(&harness.users, "erin").await;
    let rust = skill(&harness.service, "Rust", "backend").await;
    for (user_id, level) in [(novice, 1), (expert, 5)] {
        harness
            .service
            .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), level))
            .await
            .expect("attach");
    }

    let holders = harness
        .service
        .skill_holders(rust.id())
        .await
        .expect("list holders");

    let ordered: Vec<UserId> = holders.iter().map(|view| view.user_skill.user_id()).collect();
    assert_eq!(ordered, vec![expert, novice]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_user_skill_requires_existing_attachment(harness: Harness) {
    let user_id = employee(&harness.users, "frank").await;
    let rust = skill(&harness.service, "Rust", "backend").await;

    let missing = harness
        .service
        .update_user_skill(user_id, rust.id(), 3)
        .await;
    harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), 1))
        .await
        .expect("attach");
    let updated = harness
        .service
        .update_user_skill(user_id, rust.id(), 3)
        .await
        .expect("update should succeed");

    assert!(matches!(missing, Err(SkillWorkflowError::UserSkillNotFound { .. })));
    assert_eq!(updated.level().value(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_skill_is_idempotent(harness: Harness) {
    let user_id = employee(&harness.users, "grace").await;
    let rust = skill(&harness.service, "Rust", "backend").await;
    harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), 2))
        .await
        .expect("attach");

    harness
        .service
        .remove_user_skill(user_id, rust.id())
        .await
        .expect("first removal");
    harness
        .service
        .remove_user_skill(user_id, rust.id())
        .await
        .expect("second removal is not an error");

    let held = harness.service.user_skills(user_id).await.expect("list");
    assert!(held.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_skill_drops_its_attachments(harness: Harness) {
    let user_id = employee(&harness.users, "heidi").await;
    let rust = skill(&harness.service, "Rust", "backend").await;
    harness
        .service
        .add_user_skill(user_id, AddUserSkillRequest::new(rust.id(), 2))
        .await
        .expect("attach");

    harness
        .service
        .delete_skill(rust.id())
        .await
        .expect("delete skill");

    let held = harness.service.user_skills(user_id).await.expect("list");
    assert!(held.is_empty());
}
