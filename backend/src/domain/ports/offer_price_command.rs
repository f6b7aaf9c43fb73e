//! Driving port for offer price mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, OfferPrice, OfferPriceDraft, OfferPriceId, OfferPricePatch, PricingTenderId, UserId,
};

/// Request to submit an offer price against a tender.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOfferRequest {
    pub actor: UserId,
    pub tender_id: PricingTenderId,
    pub draft: OfferPriceDraft,
}

/// Request to patch an offer price.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOfferRequest {
    pub actor: UserId,
    pub offer_id: OfferPriceId,
    pub patch: OfferPricePatch,
}

/// Request to remove an offer price.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOfferRequest {
    pub actor: UserId,
    pub offer_id: OfferPriceId,
}

/// Driving port for offer price write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceCommand: Send + Sync {
    /// Submit an offer as the tender owner or a registered contractor.
    async fn submit_offer(&self, request: SubmitOfferRequest) -> Result<OfferPrice, Error>;

    /// Update an offer. Reserved to the tender owner.
    async fn update_offer(&self, request: UpdateOfferRequest) -> Result<OfferPrice, Error>;

    /// Delete an offer. Reserved to the tender owner.
    async fn delete_offer(&self, request: DeleteOfferRequest) -> Result<(), Error>;
}
