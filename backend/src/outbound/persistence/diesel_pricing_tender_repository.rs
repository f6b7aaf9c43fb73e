//! PostgreSQL-backed `PricingTenderRepository` implementation.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PricingTenderRepository, PricingTenderRepositoryError};
use crate::domain::{PricingTender, PricingTenderId, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::PricingTenderRow;
use super::pool::{DbPool, PoolError};
use super::schema::{pricing_tender_contractors, pricing_tenders};

/// Diesel-backed implementation of the pricing tender repository port.
#[derive(Clone)]
pub struct DieselPricingTenderRepository {
    pool: DbPool,
}

impl DieselPricingTenderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PricingTenderRepositoryError {
    map_basic_pool_error(error, PricingTenderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PricingTenderRepositoryError {
    map_basic_diesel_error(
        error,
        PricingTenderRepositoryError::query,
        PricingTenderRepositoryError::connection,
    )
}

impl From<PricingTenderRow> for PricingTender {
    fn from(row: PricingTenderRow) -> Self {
        Self {
            id: PricingTenderId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            owner: UserId::from_uuid(row.owner_id),
            title: row.title,
        }
    }
}

#[async_trait]
impl PricingTenderRepository for DieselPricingTenderRepository {
    async fn find_by_id(
        &self,
        id: &PricingTenderId,
    ) -> Result<Option<PricingTender>, PricingTenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = pricing_tenders::table
            .filter(pricing_tenders::id.eq(id.as_uuid()))
            .select(PricingTenderRow::as_select())
            .first::<PricingTenderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(PricingTender::from))
    }

    async fn is_contractor(
        &self,
        tender: &PricingTenderId,
        contractor: &UserId,
    ) -> Result<bool, PricingTenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            pricing_tender_contractors::table.filter(
                pricing_tender_contractors::tender_id
                    .eq(tender.as_uuid())
                    .and(pricing_tender_contractors::contractor_id.eq(contractor.as_uuid())),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
