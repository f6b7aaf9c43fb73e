//! Driving port for offer price reads.

use async_trait::async_trait;

use crate::domain::{Error, OfferPrice, OfferPriceFilter, PricingTenderId, UserId};

/// Request to list the offers on a tender.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOffersRequest {
    pub actor: UserId,
    pub tender_id: PricingTenderId,
    pub filter: OfferPriceFilter,
}

/// Driving port for reading offer prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceQuery: Send + Sync {
    /// Offers on a tender, newest first. Reserved to the tender owner.
    async fn list_offers(&self, request: ListOffersRequest) -> Result<Vec<OfferPrice>, Error>;
}
