//! Diesel schema for project persistence.

diesel::table! {
    /// Projects owned by managers.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Owning manager.
        manager_id -> Uuid,
        /// Free-form status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership rows, unique per project and user.
    project_members (project_id, user_id) {
        /// Project.
        project_id -> Uuid,
        /// Member.
        user_id -> Uuid,
        /// Role within the project.
        #[max_length = 50]
        role -> Varchar,
        /// Joining timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, project_members);
