//! Diesel schema for skill persistence.

diesel::table! {
    /// Skill catalogue.
    skills (id) {
        /// Skill identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Grouping label.
        #[max_length = 100]
        category -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills held by users, one row per user and skill.
    user_skills (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Attached skill.
        skill_id -> Uuid,
        /// Proficiency level from 1 to 5.
        level -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(user_skills -> skills (skill_id));
diesel::allow_tables_to_appear_in_same_query!(skills, user_skills);
