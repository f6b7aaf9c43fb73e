//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectDraft, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProjectRow, ProjectRow, ProjectUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{projects, users};

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    map_basic_pool_error(error, ProjectRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_basic_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let ProjectRow {
        id,
        owner_id,
        name,
        description,
        location,
        created_at,
    } = row;
    Project::from_parts(
        ProjectId::from_uuid(id),
        UserId::from_uuid(owner_id),
        ProjectDraft {
            name,
            description,
            location,
        },
        created_at,
    )
    .map_err(|err| ProjectRepositoryError::query(format!("project {id}: {err}")))
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn count_owned_by(&self, owner: &UserId) -> Result<u64, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(count).map_err(|_| ProjectRepositoryError::query("negative project count"))
    }

    async fn insert_within_quota(
        &self,
        project: &Project,
        limit: u32,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owner = *project.owner().as_uuid();
        let row = NewProjectRow {
            id: *project.id().as_uuid(),
            owner_id: owner,
            name: project.name(),
            description: project.description(),
            location: project.location(),
            created_at: project.created_at(),
        };

        conn.transaction(|conn| {
            async move {
                // Row lock on the owner serialises creates for the same account.
                users::table
                    .find(owner)
                    .select(users::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .await?;

                let owned: i64 = projects::table
                    .filter(projects::owner_id.eq(owner))
                    .count()
                    .get_result(conn)
                    .await?;
                if owned >= i64::from(limit) {
                    return Ok(false);
                }

                diesel::insert_into(projects::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = projects::table
            .filter(projects::id.eq(id.as_uuid()))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_project).transpose()
    }

    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .order((projects::created_at.asc(), projects::id.asc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ProjectUpdate {
            name: project.name(),
            description: project.description(),
            location: project.location(),
        };

        let updated = diesel::update(projects::table.find(project.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(ProjectRepositoryError::query("project vanished during update"));
        }
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(projects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
