//! PostgreSQL-backed `OfferPriceCommentRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OfferPriceCommentRepository, OfferPriceCommentRepositoryError};
use crate::domain::{OfferPriceComment, OfferPriceCommentId, OfferPriceId, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOfferPriceCommentRow, OfferPriceCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::offer_price_comments;

/// Diesel-backed implementation of the offer price comment repository port.
#[derive(Clone)]
pub struct DieselOfferPriceCommentRepository {
    pool: DbPool,
}

impl DieselOfferPriceCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OfferPriceCommentRepositoryError {
    map_basic_pool_error(error, OfferPriceCommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OfferPriceCommentRepositoryError {
    map_basic_diesel_error(
        error,
        OfferPriceCommentRepositoryError::query,
        OfferPriceCommentRepositoryError::connection,
    )
}

fn row_to_comment(
    row: OfferPriceCommentRow,
) -> Result<OfferPriceComment, OfferPriceCommentRepositoryError> {
    OfferPriceComment::new(
        OfferPriceCommentId::from_uuid(row.id),
        OfferPriceId::from_uuid(row.offer_price_id),
        ProjectId::from_uuid(row.project_id),
        UserId::from_uuid(row.author_id),
        &row.body,
        row.created_at,
    )
    .map_err(|err| OfferPriceCommentRepositoryError::query(format!("comment {}: {err}", row.id)))
}

#[async_trait]
impl OfferPriceCommentRepository for DieselOfferPriceCommentRepository {
    async fn insert(
        &self,
        comment: &OfferPriceComment,
    ) -> Result<(), OfferPriceCommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewOfferPriceCommentRow {
            id: *comment.id().as_uuid(),
            offer_price_id: *comment.offer_price_id().as_uuid(),
            project_id: *comment.project_id().as_uuid(),
            author_id: *comment.author().as_uuid(),
            body: comment.body(),
            created_at: comment.created_at(),
        };

        diesel::insert_into(offer_price_comments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_offer_price(
        &self,
        offer_price: &OfferPriceId,
    ) -> Result<Vec<OfferPriceComment>, OfferPriceCommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OfferPriceCommentRow> = offer_price_comments::table
            .filter(offer_price_comments::offer_price_id.eq(offer_price.as_uuid()))
            .order((
                offer_price_comments::created_at.asc(),
                offer_price_comments::id.asc(),
            ))
            .select(OfferPriceCommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_comment).collect()
    }
}
