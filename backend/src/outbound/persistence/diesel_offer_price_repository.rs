//! PostgreSQL-backed `OfferPriceRepository` implementation.
//!
//! List filters are pushed into SQL: the title filter becomes an escaped
//! `ILIKE`, and calendar-day bounds become half-open UTC timestamp ranges.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use diesel::PgTextExpressionMethods;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OfferPriceRepository, OfferPriceRepositoryError};
use crate::domain::{
    OfferPrice, OfferPriceDraft, OfferPriceFilter, OfferPriceId, PricingTenderId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOfferPriceRow, OfferPriceRow, OfferPriceUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::offer_prices;

/// Diesel-backed implementation of the offer price repository port.
#[derive(Clone)]
pub struct DieselOfferPriceRepository {
    pool: DbPool,
}

impl DieselOfferPriceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OfferPriceRepositoryError {
    map_basic_pool_error(error, OfferPriceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OfferPriceRepositoryError {
    map_basic_diesel_error(
        error,
        OfferPriceRepositoryError::query,
        OfferPriceRepositoryError::connection,
    )
}

fn row_to_offer(row: OfferPriceRow) -> Result<OfferPrice, OfferPriceRepositoryError> {
    let OfferPriceRow {
        id,
        tender_id,
        title,
        amount,
        notes,
        submitted_by,
        date_created,
    } = row;
    OfferPrice::create(
        OfferPriceId::from_uuid(id),
        PricingTenderId::from_uuid(tender_id),
        UserId::from_uuid(submitted_by),
        OfferPriceDraft {
            title,
            amount,
            notes,
        },
        date_created,
    )
    .map_err(|err| OfferPriceRepositoryError::query(format!("offer price {id}: {err}")))
}

/// Escape `LIKE` metacharacters and wrap the needle for a substring match.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[async_trait]
impl OfferPriceRepository for DieselOfferPriceRepository {
    async fn insert(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewOfferPriceRow {
            id: *offer.id().as_uuid(),
            tender_id: *offer.tender_id().as_uuid(),
            title: offer.title(),
            amount: offer.amount(),
            notes: offer.notes(),
            submitted_by: *offer.submitted_by().as_uuid(),
            date_created: offer.date_created(),
        };

        diesel::insert_into(offer_prices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &OfferPriceId,
    ) -> Result<Option<OfferPrice>, OfferPriceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = offer_prices::table
            .filter(offer_prices::id.eq(id.as_uuid()))
            .select(OfferPriceRow::as_select())
            .first::<OfferPriceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_offer).transpose()
    }

    async fn update(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = OfferPriceUpdate {
            title: offer.title(),
            amount: offer.amount(),
            notes: offer.notes(),
        };

        diesel::update(offer_prices::table.find(offer.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &OfferPriceId) -> Result<(), OfferPriceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(offer_prices::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_tender(
        &self,
        tender: &PricingTenderId,
        filter: &OfferPriceFilter,
    ) -> Result<Vec<OfferPrice>, OfferPriceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = offer_prices::table
            .filter(offer_prices::tender_id.eq(*tender.as_uuid()))
            .select(OfferPriceRow::as_select())
            .into_boxed();
        if let Some(title) = filter.title() {
            query = query.filter(offer_prices::title.ilike(contains_pattern(title)));
        }
        if let Some(start) = filter.start_date() {
            query = query.filter(offer_prices::date_created.ge(start_of_day(start)));
        }
        if let Some(next_day) = filter
            .end_date()
            .and_then(|end| end.checked_add_days(Days::new(1)))
        {
            query = query.filter(offer_prices::date_created.lt(start_of_day(next_day)));
        }

        let rows: Vec<OfferPriceRow> = query
            .order((offer_prices::date_created.desc(), offer_prices::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_offer).collect()
    }
}
