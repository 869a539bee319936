//! Diesel row models for skill persistence.

use super::schema::{skills, user_skills};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row for skill records, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SkillRow {
    /// Skill identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Grouping label.
    pub category: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row for user skill attachments, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserSkillRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Attached skill.
    pub skill_id: uuid::Uuid,
    /// Proficiency level.
    pub level: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
