//! Port for offer price comment persistence.

use async_trait::async_trait;

use crate::domain::{Error, OfferPriceComment, OfferPriceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum OfferPriceCommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "offer price comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "offer price comment repository query failed: {message}",
    }
}

/// Storage for offer price comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceCommentRepository: Send + Sync {
    /// Persist a new comment.
    async fn insert(
        &self,
        comment: &OfferPriceComment,
    ) -> Result<(), OfferPriceCommentRepositoryError>;

    /// Comments on `offer_price`, oldest first.
    async fn list_for_offer_price(
        &self,
        offer_price: &OfferPriceId,
    ) -> Result<Vec<OfferPriceComment>, OfferPriceCommentRepositoryError>;
}

impl From<OfferPriceCommentRepositoryError> for Error {
    fn from(err: OfferPriceCommentRepositoryError) -> Self {
        match err {
            OfferPriceCommentRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            OfferPriceCommentRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
