//! Driving port for reading offer price comments.

use async_trait::async_trait;

use crate::domain::{Error, OfferPriceComment, OfferPriceId, UserId};

/// Request to read one offer price thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCommentsRequest {
    pub actor: UserId,
    pub offer_price_id: OfferPriceId,
}

/// Driving port for reading offer price threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceCommentQuery: Send + Sync {
    /// Comments on an offer price, oldest first, for project participants.
    async fn list_comments(
        &self,
        request: ListCommentsRequest,
    ) -> Result<Vec<OfferPriceComment>, Error>;
}
