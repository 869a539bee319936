//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Due date.
        deadline -> Timestamptz,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Completion percentage.
        progress -> Int4,
        /// Estimated hours.
        hours -> Int4,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Kind of work.
        #[max_length = 50]
        task_type -> Varchar,
        /// Optional parent task.
        parent_task_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills a task requires.
    task_skills (task_id, skill_id) {
        /// Task.
        task_id -> Uuid,
        /// Required skill.
        skill_id -> Uuid,
        /// Attachment timestamp, used for ordering.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Users assigned to a task.
    task_assignees (task_id, user_id) {
        /// Task.
        task_id -> Uuid,
        /// Assigned user.
        user_id -> Uuid,
        /// Assignment timestamp, used for ordering.
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(task_skills -> tasks (task_id));
diesel::joinable!(task_assignees -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_skills, task_assignees);
