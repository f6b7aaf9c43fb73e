//! PostgreSQL-backed `UserDirectory` reading the shared `users` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{PhoneNumber, User, UserDraft, UserId, UserRole};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user directory port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, UserDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

/// Convert a stored row into a validated domain user.
pub(crate) fn row_to_user(row: UserRow) -> Result<User, UserDirectoryError> {
    let UserRow {
        id,
        first_name,
        phone_number,
        role,
        projects_limit,
    } = row;
    let corrupt = |what: String| UserDirectoryError::query(format!("user {id}: {what}"));

    User::new(UserDraft {
        id: UserId::from_uuid(id),
        first_name,
        phone_number: PhoneNumber::new(phone_number).map_err(|err| corrupt(err.to_string()))?,
        role: role
            .parse::<UserRole>()
            .map_err(|err| corrupt(err.to_string()))?,
        projects_limit: u32::try_from(projects_limit)
            .map_err(|_| corrupt("negative projects_limit".to_owned()))?,
    })
    .map_err(|err| corrupt(err.to_string()))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::phone_number.eq(phone_number.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
