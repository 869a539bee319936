//! Diesel schema for comment persistence.

diesel::table! {
    /// Comments on tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Author.
        user_id -> Uuid,
        /// Comment body.
        text -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
