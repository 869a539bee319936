//! Domain tests for task attributes, deadlines, and the task aggregate.

use crate::{
    project::domain::ProjectId,
    task::domain::{
        NewTaskData, Progress, Task, TaskDomainError, TaskPriority, TaskStatus, TaskType,
        parse_deadline,
    },
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn new_task_data() -> NewTaskData {
    NewTaskData {
        project_id: ProjectId::new(),
        title: "  Write release notes ".to_owned(),
        description: String::new(),
        deadline: Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).single().expect("valid date"),
        hours: 4,
        priority: TaskPriority::default(),
        task_type: TaskType::default(),
        parent_task_id: None,
    }
}

#[rstest]
fn new_task_is_pending_with_no_progress(new_task_data: NewTaskData) {
    let task = Task::new(new_task_data, &DefaultClock).expect("valid task");

    assert_eq!(task.title(), "Write release notes");
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.progress().value(), 0);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.task_type(), TaskType::Task);
    assert!(!task.is_completed());
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn blank_title_is_rejected(mut new_task_data: NewTaskData) {
    new_task_data.title = "   ".to_owned();

    assert_eq!(
        Task::new(new_task_data, &DefaultClock),
        Err(TaskDomainError::EmptyTitle)
    );
}

#[rstest]
fn hours_above_storage_range_are_rejected(mut new_task_data: NewTaskData) {
    new_task_data.hours = Task::MAX_HOURS + 1;

    assert_eq!(
        Task::new(new_task_data, &DefaultClock),
        Err(TaskDomainError::HoursOutOfRange(Task::MAX_HOURS + 1))
    );
}

#[rstest]
fn set_hours_keeps_estimate_when_out_of_range(new_task_data: NewTaskData) {
    let mut task = Task::new(new_task_data, &DefaultClock).expect("valid task");

    let result = task.set_hours(u32::MAX, &DefaultClock);

    assert_eq!(result, Err(TaskDomainError::HoursOutOfRange(u32::MAX)));
    assert_eq!(task.hours(), 4);
    task.set_hours(Task::MAX_HOURS, &DefaultClock).expect("largest estimate fits");
    assert_eq!(task.hours(), Task::MAX_HOURS);
}

#[rstest]
fn completing_a_task_marks_it_completed(new_task_data: NewTaskData) {
    let mut task = Task::new(new_task_data, &DefaultClock).expect("valid task");

    task.set_status(TaskStatus::Completed, &DefaultClock);

    assert!(task.is_completed());
}

#[rstest]
#[case(-1)]
#[case(101)]
#[case(1000)]
fn progress_rejects_out_of_range_values(#[case] raw: i32) {
    assert_eq!(
        Progress::new(raw),
        Err(TaskDomainError::ProgressOutOfRange(raw))
    );
}

#[rstest]
#[case(0)]
#[case(55)]
#[case(100)]
fn progress_accepts_percentages(#[case] raw: i32) {
    let progress = Progress::new(raw).expect("valid progress");
    assert_eq!(i32::from(progress), raw);
}

#[test]
fn deadline_accepts_offsets_and_normalises_to_utc() {
    let parsed = parse_deadline("2026-03-01T17:00:00+02:00").expect("valid deadline");

    assert_eq!(
        parsed,
        Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).single().expect("valid date")
    );
}

#[rstest]
#[case("tomorrow")]
#[case("2026-03-01")]
#[case("")]
fn deadline_rejects_non_rfc3339_values(#[case] raw: &str) {
    assert_eq!(
        parse_deadline(raw),
        Err(TaskDomainError::InvalidDeadline(raw.to_owned()))
    );
}

#[rstest]
#[case("", TaskPriority::Medium)]
#[case("urgent", TaskPriority::Urgent)]
#[case(" low ", TaskPriority::Low)]
fn priority_defaults_when_blank(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::parse_or_default(raw), Ok(expected));
}

#[test]
fn unknown_attribute_values_are_rejected() {
    assert_eq!(
        TaskPriority::parse_or_default("critical"),
        Err(TaskDomainError::UnknownPriority("critical".to_owned()))
    );
    assert_eq!(
        TaskType::parse_or_default("story"),
        Err(TaskDomainError::UnknownType("story".to_owned()))
    );
    assert_eq!(
        TaskStatus::try_from("done"),
        Err(TaskDomainError::UnknownStatus("done".to_owned()))
    );
}

#[rstest]
#[case("HIGH")]
#[case("Urgent")]
fn priority_is_case_sensitive(#[case] raw: &str) {
    assert_eq!(
        TaskPriority::parse_or_default(raw),
        Err(TaskDomainError::UnknownPriority(raw.to_owned()))
    );
}

#[rstest]
#[case("Bug")]
#[case("EPIC")]
fn task_type_is_case_sensitive(#[case] raw: &str) {
    assert_eq!(
        TaskType::parse_or_default(raw),
        Err(TaskDomainError::UnknownType(raw.to_owned()))
    );
}

#[rstest]
#[case("COMPLETED")]
#[case("In_Progress")]
fn status_is_case_sensitive(#[case] raw: &str) {
    assert_eq!(
        TaskStatus::try_from(raw),
        Err(TaskDomainError::UnknownStatus(raw.to_owned()))
    );
}

#[rstest]
fn task_serializes_type_and_status_in_snake_case(new_task_data: NewTaskData) {
    let mut task = Task::new(new_task_data, &DefaultClock).expect("valid task");
    task.set_status(TaskStatus::InProgress, &DefaultClock);
    task.set_task_type(TaskType::Bug, &DefaultClock);

    let json = serde_json::to_value(&task).expect("task serializes");

    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("in_progress"));
    assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("bug"));
    assert_eq!(json.get("progress").and_then(serde_json::Value::as_i64), Some(0));
}
