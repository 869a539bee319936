//! Diesel row models for project persistence.

use super::schema::{project_members, projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row for project records, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owning manager.
    pub manager_id: uuid::Uuid,
    /// Free-form status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row for membership records, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectMemberRow {
    /// Project.
    pub project_id: uuid::Uuid,
    /// Member.
    pub user_id: uuid::Uuid,
    /// Role within the project.
    pub role: String,
    /// Joining timestamp.
    pub joined_at: DateTime<Utc>,
}
