//! Offer price service.
//!
//! Tender owners and their registered contractors submit offers; only the
//! tender owner reads, edits or removes them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::access::{ensure_can_submit_offer, ensure_tender_owner};
use crate::domain::ports::{
    DeleteOfferRequest, ListOffersRequest, OfferPriceCommand, OfferPriceQuery,
    OfferPriceRepository, PricingTenderRepository, SubmitOfferRequest, UpdateOfferRequest,
};
use crate::domain::{
    AccessDenied, Error, OfferPrice, OfferPriceId, OfferPriceValidationError, PricingTender,
    PricingTenderId, UserId,
};

fn invalid_offer(err: OfferPriceValidationError) -> Error {
    Error::invalid_request(format!("invalid offer price: {err}"))
}

fn denied(actor: UserId, tender: &PricingTender, reason: AccessDenied) -> Error {
    debug!(%actor, tender_id = %tender.id, reason = reason.code(), "offer access denied");
    Error::from(reason)
}

/// Service implementing [`OfferPriceCommand`] and [`OfferPriceQuery`].
#[derive(Clone)]
pub struct OfferPriceService<T, O> {
    tenders: Arc<T>,
    offers: Arc<O>,
}

impl<T, O> OfferPriceService<T, O> {
    /// Create a new service over the tender and offer price repositories.
    pub fn new(tenders: Arc<T>, offers: Arc<O>) -> Self {
        Self { tenders, offers }
    }
}

impl<T, O> OfferPriceService<T, O>
where
    T: PricingTenderRepository,
    O: OfferPriceRepository,
{
    async fn tender(&self, id: PricingTenderId) -> Result<PricingTender, Error> {
        self.tenders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("pricing tender {id} not found")))
    }

    /// Load an offer and confirm `actor` owns its tender.
    async fn owned_offer(&self, actor: UserId, id: OfferPriceId) -> Result<OfferPrice, Error> {
        let offer = self
            .offers
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("offer price {id} not found")))?;
        let tender = self.tender(offer.tender_id()).await?;
        ensure_tender_owner(actor, &tender).map_err(|reason| denied(actor, &tender, reason))?;
        Ok(offer)
    }
}

#[async_trait]
impl<T, O> OfferPriceCommand for OfferPriceService<T, O>
where
    T: PricingTenderRepository,
    O: OfferPriceRepository,
{
    async fn submit_offer(&self, request: SubmitOfferRequest) -> Result<OfferPrice, Error> {
        let SubmitOfferRequest {
            actor,
            tender_id,
            draft,
        } = request;
        let tender = self.tender(tender_id).await?;
        let is_contractor = if tender.is_owned_by(actor) {
            false
        } else {
            self.tenders.is_contractor(&tender.id, &actor).await?
        };
        ensure_can_submit_offer(actor, &tender, is_contractor)
            .map_err(|reason| denied(actor, &tender, reason))?;

        let offer = OfferPrice::create(OfferPriceId::random(), tender.id, actor, draft, Utc::now())
            .map_err(invalid_offer)?;
        self.offers.insert(&offer).await?;
        info!(
            offer_id = %offer.id(),
            tender_id = %tender.id,
            submitted_by = %actor,
            "offer submitted"
        );
        Ok(offer)
    }

    async fn update_offer(&self, request: UpdateOfferRequest) -> Result<OfferPrice, Error> {
        let offer = self.owned_offer(request.actor, request.offer_id).await?;
        let updated = offer.patched(request.patch).map_err(invalid_offer)?;
        self.offers.update(&updated).await?;
        info!(offer_id = %updated.id(), "offer updated");
        Ok(updated)
    }

    async fn delete_offer(&self, request: DeleteOfferRequest) -> Result<(), Error> {
        let offer = self.owned_offer(request.actor, request.offer_id).await?;
        self.offers.delete(&offer.id()).await?;
        info!(offer_id = %offer.id(), "offer deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, O> OfferPriceQuery for OfferPriceService<T, O>
where
    T: PricingTenderRepository,
    O: OfferPriceRepository,
{
    async fn list_offers(&self, request: ListOffersRequest) -> Result<Vec<OfferPrice>, Error> {
        let tender = self.tender(request.tender_id).await?;
        ensure_tender_owner(request.actor, &tender)
            .map_err(|reason| denied(request.actor, &tender, reason))?;
        Ok(self
            .offers
            .list_for_tender(&tender.id, &request.filter)
            .await?)
    }
}

#[cfg(test)]
#[path = "offer_price_service_tests.rs"]
mod tests;
