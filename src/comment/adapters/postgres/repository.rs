//! `PostgreSQL` repository implementation for comments.

use super::schema::comments;
use crate::{
    comment::{
        domain::{Comment, CommentId, PersistedCommentData},
        ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
    },
    identity::domain::UserId,
    task::domain::TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the comment adapter.
pub type CommentPgPool = Pool<ConnectionManager<PgConnection>>;

/// Row for comment records, used for both queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct CommentRow {
    id: uuid::Uuid,
    task_id: uuid::Uuid,
    user_id: uuid::Uuid,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: CommentPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CommentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment);
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => CommentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment);
        self.run_blocking(move |connection| {
            let updated = diesel::update(comments::table.filter(comments::id.eq(row.id)))
                .set((
                    comments::text.eq(&row.text),
                    comments::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CommentRepositoryError::NotFound(comment_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(comments::table.filter(comments::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(id.into_inner()))
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?;
            Ok(row.map(row_to_comment))
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_comment).collect())
        })
        .await
    }
}

fn to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        user_id: comment.user_id().into_inner(),
        text: comment.text().to_owned(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        text: row.text,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
