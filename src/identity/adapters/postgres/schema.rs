//! Diesel schema for user persistence.

diesel::table! {
    /// Registered platform users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 50]
        username -> Varchar,
        /// Encoded password hash.
        password_hash -> Text,
        /// Platform role.
        #[max_length = 20]
        role -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Contact email.
        #[max_length = 255]
        email -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
