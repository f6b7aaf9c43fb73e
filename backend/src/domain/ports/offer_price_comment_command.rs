//! Driving port for posting offer price comments.

use async_trait::async_trait;

use crate::domain::{Error, OfferPriceComment, OfferPriceId, ProjectId, UserId};

/// Request to post a comment on an offer price.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCommentRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
    pub offer_price_id: OfferPriceId,
    pub body: String,
}

/// Driving port for writing to offer price threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferPriceCommentCommand: Send + Sync {
    /// Post a comment as the project owner or a member.
    async fn post_comment(&self, request: PostCommentRequest) -> Result<OfferPriceComment, Error>;
}
