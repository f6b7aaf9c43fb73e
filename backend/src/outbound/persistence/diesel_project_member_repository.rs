//! PostgreSQL-backed `ProjectMemberRepository` implementation.
//!
//! Duplicate inserts are detected through the `(project_id, member_id)`
//! unique constraint and reported as `Duplicate`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProjectMemberRepository, ProjectMemberRepositoryError};
use crate::domain::{MemberSummary, PhoneNumber, ProjectId, ProjectMember, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewProjectMemberRow;
use super::pool::{DbPool, PoolError};
use super::schema::{project_members, users};

/// Diesel-backed implementation of the project member repository port.
#[derive(Clone)]
pub struct DieselProjectMemberRepository {
    pool: DbPool,
}

impl DieselProjectMemberRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectMemberRepositoryError {
    map_basic_pool_error(error, ProjectMemberRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectMemberRepositoryError {
    if is_unique_violation(&error) {
        return ProjectMemberRepositoryError::duplicate("project member");
    }
    map_basic_diesel_error(
        error,
        ProjectMemberRepositoryError::query,
        ProjectMemberRepositoryError::connection,
    )
}

#[async_trait]
impl ProjectMemberRepository for DieselProjectMemberRepository {
    async fn is_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            project_members::table.filter(
                project_members::project_id
                    .eq(project.as_uuid())
                    .and(project_members::member_id.eq(member.as_uuid())),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, member: &ProjectMember) -> Result<(), ProjectMemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewProjectMemberRow {
            id: *member.id.as_uuid(),
            project_id: *member.project_id.as_uuid(),
            member_id: *member.member_id.as_uuid(),
            phone_number: member.phone_number.as_ref(),
        };

        diesel::insert_into(project_members::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            project_members::table.filter(
                project_members::project_id
                    .eq(project.as_uuid())
                    .and(project_members::member_id.eq(member.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_member_summaries(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<MemberSummary>, ProjectMemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, String, String)> = project_members::table
            .inner_join(users::table)
            .filter(project_members::project_id.eq(project.as_uuid()))
            .order((project_members::created_at.asc(), project_members::id.asc()))
            .select((users::id, users::first_name, users::phone_number))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(id, first_name, phone_number)| {
                let phone_number = PhoneNumber::new(phone_number).map_err(|err| {
                    ProjectMemberRepositoryError::query(format!("member {id}: {err}"))
                })?;
                Ok(MemberSummary {
                    id: UserId::from_uuid(id),
                    first_name,
                    phone_number,
                })
            })
            .collect()
    }
}
