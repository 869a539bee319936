//! `PostgreSQL` repository implementation for skills.

use super::{
    models::{SkillRow, UserSkillRow},
    schema::{skills, user_skills},
};
use crate::{
    identity::domain::UserId,
    skill::{
        domain::{
            PersistedSkillData, PersistedUserSkillData, Skill, SkillId, SkillLevel, UserSkill,
            UserSkillId,
        },
        ports::{SkillRepository, SkillRepositoryError, SkillRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by skill adapters.
pub type SkillPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed skill repository.
#[derive(Debug, Clone)]
pub struct PostgresSkillRepository {
    pool: SkillPgPool,
}

impl PostgresSkillRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SkillPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SkillRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SkillRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SkillRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SkillRepositoryError::persistence)?
    }
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn store_skill(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let skill_id = skill.id();
        let row = to_skill_row(skill);
        self.run_blocking(move |connection| {
            diesel::insert_into(skills::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SkillRepositoryError::DuplicateSkill(skill_id)
                    }
                    _ => SkillRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_skill(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let skill_id = skill.id();
        let row = to_skill_row(skill);
        self.run_blocking(move |connection| {
            let updated = diesel::update(skills::table.filter(skills::id.eq(row.id)))
                .set((
                    skills::name.eq(&row.name),
                    skills::description.eq(&row.description),
                    skills::category.eq(&row.category),
                    skills::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(SkillRepositoryError::persistence)?;
            if updated == 0 {
                return Err(SkillRepositoryError::SkillNotFound(skill_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_skill(&self, id: SkillId) -> SkillRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        user_skills::table.filter(user_skills::skill_id.eq(id.into_inner())),
                    )
                    .execute(tx)?;
                    diesel::delete(skills::table.filter(skills::id.eq(id.into_inner()))).execute(tx)
                })
                .map_err(SkillRepositoryError::persistence)
                .and_then(|deleted| {
                    if deleted == 0 {
                        Err(SkillRepositoryError::SkillNotFound(id))
                    } else {
                        Ok(())
                    }
                })
        })
        .await
    }

    async fn find_skill(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        self.run_blocking(move |connection| {
            let row = skills::table
                .filter(skills::id.eq(id.into_inner()))
                .select(SkillRow::as_select())
                .first::<SkillRow>(connection)
                .optional()
                .map_err(SkillRepositoryError::persistence)?;
            Ok(row.map(row_to_skill))
        })
        .await
    }

    async fn list_skills(&self) -> SkillRepositoryResult<Vec<Skill>> {
        self.run_blocking(move |connection| {
            let rows = skills::table
                .order(skills::name.asc())
                .select(SkillRow::as_select())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_skill).collect())
        })
        .await
    }

    async fn list_skills_by_category(&self, category: &str) -> SkillRepositoryResult<Vec<Skill>> {
        let lookup = category.to_owned();
        self.run_blocking(move |connection| {
            let rows = skills::table
                .filter(skills::category.eq(&lookup))
                .order(skills::name.asc())
                .select(SkillRow::as_select())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_skill).collect())
        })
        .await
    }

    async fn store_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()> {
        let user_id = user_skill.user_id();
        let skill_id = user_skill.skill_id();
        let row = to_user_skill_row(user_skill);
        self.run_blocking(move |connection| {
            diesel::insert_into(user_skills::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SkillRepositoryError::DuplicateUserSkill { user_id, skill_id }
                    }
                    _ => SkillRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_user_skill(&self, user_skill: &UserSkill) -> SkillRepositoryResult<()> {
        let id = user_skill.id();
        let row = to_user_skill_row(user_skill);
        self.run_blocking(move |connection| {
            let updated = diesel::update(user_skills::table.filter(user_skills::id.eq(row.id)))
                .set((
                    user_skills::level.eq(row.level),
                    user_skills::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(SkillRepositoryError::persistence)?;
            if updated == 0 {
                return Err(SkillRepositoryError::UserSkillNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Option<UserSkill>> {
        self.run_blocking(move |connection| {
            let row = user_skills::table
                .filter(user_skills::user_id.eq(user_id.into_inner()))
                .filter(user_skills::skill_id.eq(skill_id.into_inner()))
                .select(UserSkillRow::as_select())
                .first::<UserSkillRow>(connection)
                .optional()
                .map_err(SkillRepositoryError::persistence)?;
            row.map(row_to_user_skill).transpose()
        })
        .await
    }

    async fn user_skills_for_user(&self, user_id: UserId) -> SkillRepositoryResult<Vec<UserSkill>> {
        self.run_blocking(move |connection| {
            let rows = user_skills::table
                .filter(user_skills::user_id.eq(user_id.into_inner()))
                .order(user_skills::created_at.desc())
                .select(UserSkillRow::as_select())
                .load::<UserSkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user_skill).collect()
        })
        .await
    }

    async fn user_skills_for_skill(
        &self,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<Vec<UserSkill>> {
        self.run_blocking(move |connection| {
            let rows = user_skills::table
                .filter(user_skills::skill_id.eq(skill_id.into_inner()))
                .order(user_skills::level.desc())
                .select(UserSkillRow::as_select())
                .load::<UserSkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user_skill).collect()
        })
        .await
    }

    async fn delete_user_skill(
        &self,
        user_id: UserId,
        skill_id: SkillId,
    ) -> SkillRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                user_skills::table
                    .filter(user_skills::user_id.eq(user_id.into_inner()))
                    .filter(user_skills::skill_id.eq(skill_id.into_inner())),
            )
            .execute(connection)
            .map_err(SkillRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn to_skill_row(skill: &Skill) -> SkillRow {
    SkillRow {
        id: skill.id().into_inner(),
        name: skill.name().to_owned(),
        description: skill.description().to_owned(),
        category: skill.category().to_owned(),
        created_at: skill.created_at(),
        updated_at: skill.updated_at(),
    }
}

fn row_to_skill(row: SkillRow) -> Skill {
    Skill::from_persisted(PersistedSkillData {
        id: SkillId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        category: row.category,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_user_skill_row(user_skill: &UserSkill) -> UserSkillRow {
    UserSkillRow {
        id: user_skill.id().into_inner(),
        user_id: user_skill.user_id().into_inner(),
        skill_id: user_skill.skill_id().into_inner(),
        level: i32::from(user_skill.level()),
        created_at: user_skill.created_at(),
        updated_at: user_skill.updated_at(),
    }
}

fn row_to_user_skill(row: UserSkillRow) -> SkillRepositoryResult<UserSkill> {
    let level = SkillLevel::new(row.level).map_err(SkillRepositoryError::persistence)?;
    Ok(UserSkill::from_persisted(PersistedUserSkillData {
        id: UserSkillId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        skill_id: SkillId::from_uuid(row.skill_id),
        level,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
