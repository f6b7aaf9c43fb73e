//! Port for reading pricing tenders and their contractor registrations.

use async_trait::async_trait;

use crate::domain::{Error, PricingTender, PricingTenderId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pricing tender repository adapters.
    pub enum PricingTenderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pricing tender repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "pricing tender repository query failed: {message}",
    }
}

/// Read access to pricing tenders and their registered contractors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingTenderRepository: Send + Sync {
    /// Fetch a tender by identifier.
    async fn find_by_id(
        &self,
        id: &PricingTenderId,
    ) -> Result<Option<PricingTender>, PricingTenderRepositoryError>;

    /// True when `contractor` is registered on `tender`.
    async fn is_contractor(
        &self,
        tender: &PricingTenderId,
        contractor: &UserId,
    ) -> Result<bool, PricingTenderRepositoryError>;
}

impl From<PricingTenderRepositoryError> for Error {
    fn from(err: PricingTenderRepositoryError) -> Self {
        match err {
            PricingTenderRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            PricingTenderRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
