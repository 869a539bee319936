//! `PostgreSQL` repository implementation for projects.

use super::{
    models::{ProjectMemberRow, ProjectRow},
    schema::{project_members, projects},
};
use crate::{
    identity::domain::UserId,
    project::{
        domain::{MemberRole, PersistedProjectData, Project, ProjectId, ProjectMember},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_row(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.filter(projects::id.eq(row.id)))
                .set((
                    projects::name.eq(&row.name),
                    projects::description.eq(&row.description),
                    projects::status.eq(&row.status),
                    projects::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        project_members::table
                            .filter(project_members::project_id.eq(id.into_inner())),
                    )
                    .execute(tx)?;
                    diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                        .execute(tx)
                })
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn find_by_manager(&self, manager_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::manager_id.eq(manager_id.into_inner()))
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let project_id = member.project_id();
        let user_id = member.user_id();
        let row = ProjectMemberRow {
            project_id: project_id.into_inner(),
            user_id: user_id.into_inner(),
            role: member.role().as_str().to_owned(),
            joined_at: member.joined_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(project_members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateMember {
                            project_id,
                            user_id,
                        }
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Option<ProjectMember>> {
        self.run_blocking(move |connection| {
            let row = project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .select(ProjectMemberRow::as_select())
                .first::<ProjectMemberRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(row.map(row_to_member))
        })
        .await
    }

    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<ProjectMember>> {
        self.run_blocking(move |connection| {
            let rows = project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .order(project_members::joined_at.asc())
                .select(ProjectMemberRow::as_select())
                .load::<ProjectMemberRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_member).collect())
        })
        .await
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner()))
                    .filter(project_members::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn remove_members_except(
        &self,
        project_id: ProjectId,
        keep: UserId,
    ) -> ProjectRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner()))
                    .filter(project_members::user_id.ne(keep.into_inner())),
            )
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

fn to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        manager_id: project.manager_id().into_inner(),
        status: project.status().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        manager_id: UserId::from_uuid(row.manager_id),
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_member(row: ProjectMemberRow) -> ProjectMember {
    ProjectMember::from_persisted(
        ProjectId::from_uuid(row.project_id),
        UserId::from_uuid(row.user_id),
        MemberRole::new(row.role),
        row.joined_at,
    )
}
