//! Port for offer price persistence.

use async_trait::async_trait;

use crate::domain::{Error, OfferPrice, OfferPriceFilter, OfferPriceId, PricingTenderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by offer price repository adapters.
    pub enum OfferPriceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "offer price repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "offer price repository query failed: {message}",
    }
}

/// Storage for offer prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceRepository: Send + Sync {
    /// Persist a new offer price.
    async fn insert(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError>;

    /// Fetch an offer price by identifier.
    async fn find_by_id(
        &self,
        id: &OfferPriceId,
    ) -> Result<Option<OfferPrice>, OfferPriceRepositoryError>;

    /// Overwrite the mutable fields of an existing offer price.
    async fn update(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError>;

    /// Remove an offer price and its comments.
    async fn delete(&self, id: &OfferPriceId) -> Result<(), OfferPriceRepositoryError>;

    /// Offer prices on `tender` matching `filter`, newest first.
    async fn list_for_tender(
        &self,
        tender: &PricingTenderId,
        filter: &OfferPriceFilter,
    ) -> Result<Vec<OfferPrice>, OfferPriceRepositoryError>;
}

impl From<OfferPriceRepositoryError> for Error {
    fn from(err: OfferPriceRepositoryError) -> Self {
        match err {
            OfferPriceRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            OfferPriceRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
