//! `PostgreSQL` repository implementation for tasks.

use super::{
    models::{NewTaskAssigneeRow, NewTaskSkillRow, TaskRow},
    schema::{task_assignees, task_skills, tasks},
};
use crate::{
    identity::domain::UserId,
    project::domain::ProjectId,
    skill::domain::SkillId,
    task::{
        domain::{
            PersistedTaskData, Progress, Task, TaskId, TaskPriority, TaskStatus, TaskType,
        },
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set((
                    tasks::title.eq(&row.title),
                    tasks::description.eq(&row.description),
                    tasks::deadline.eq(row.deadline),
                    tasks::status.eq(&row.status),
                    tasks::progress.eq(row.progress),
                    tasks::hours.eq(row.hours),
                    tasks::priority.eq(&row.priority),
                    tasks::task_type.eq(&row.task_type),
                    tasks::parent_task_id.eq(row.parent_task_id),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        task_skills::table.filter(task_skills::task_id.eq(id.into_inner())),
                    )
                    .execute(tx)?;
                    diesel::delete(
                        task_assignees::table.filter(task_assignees::task_id.eq(id.into_inner())),
                    )
                    .execute(tx)?;
                    diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner()))).execute(tx)
                })
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .inner_join(task_assignees::table)
                .filter(task_assignees::user_id.eq(user_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::parent_task_id.eq(parent_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn attach_skill(&self, task_id: TaskId, skill_id: SkillId) -> TaskRepositoryResult<()> {
        let row = NewTaskSkillRow {
            task_id: task_id.into_inner(),
            skill_id: skill_id.into_inner(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_skills::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateSkill { task_id, skill_id }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn skills(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<SkillId>> {
        self.run_blocking(move |connection| {
            let ids = task_skills::table
                .filter(task_skills::task_id.eq(task_id.into_inner()))
                .order(task_skills::created_at.asc())
                .select(task_skills::skill_id)
                .load::<uuid::Uuid>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(ids.into_iter().map(SkillId::from_uuid).collect())
        })
        .await
    }

    async fn clear_skills(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(task_skills::table.filter(task_skills::task_id.eq(task_id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn attach_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<()> {
        let row = NewTaskAssigneeRow {
            task_id: task_id.into_inner(),
            user_id: user_id.into_inner(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_assignees::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateAssignee { task_id, user_id }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let ids = task_assignees::table
                .filter(task_assignees::task_id.eq(task_id.into_inner()))
                .order(task_assignees::assigned_at.asc())
                .select(task_assignees::user_id)
                .load::<uuid::Uuid>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(ids.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }

    async fn clear_assignees(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                task_assignees::table.filter(task_assignees::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        deadline: task.deadline(),
        status: task.status().as_str().to_owned(),
        progress: i32::from(task.progress()),
        hours: i32::try_from(task.hours()).map_err(TaskRepositoryError::persistence)?,
        priority: task.priority().as_str().to_owned(),
        task_type: task.task_type().as_str().to_owned(),
        parent_task_id: task.parent_task_id().map(TaskId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let task_type =
        TaskType::try_from(row.task_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let progress = Progress::new(row.progress).map_err(TaskRepositoryError::persistence)?;
    let hours = u32::try_from(row.hours).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: row.title,
        description: row.description,
        deadline: row.deadline,
        status,
        progress,
        hours,
        priority,
        task_type,
        parent_task_id: row.parent_task_id.map(TaskId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
