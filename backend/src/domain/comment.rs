//! Discussion threads attached to offer prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OfferPriceCommentId, OfferPriceId, ProjectId, UserId};

/// Maximum length of a comment body, in characters.
pub const COMMENT_BODY_MAX: usize = 4000;

/// Validation errors for comment bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment body must not be empty")]
    EmptyBody,
    #[error("comment body must be at most {max} characters")]
    BodyTooLong { max: usize },
}

/// A comment left by a project participant on an offer price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPriceComment {
    id: OfferPriceCommentId,
    offer_price_id: OfferPriceId,
    project_id: ProjectId,
    author: UserId,
    body: String,
    created_at: DateTime<Utc>,
}

impl OfferPriceComment {
    /// Validate and build a comment.
    pub fn new(
        id: OfferPriceCommentId,
        offer_price_id: OfferPriceId,
        project_id: ProjectId,
        author: UserId,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CommentValidationError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        if body.chars().count() > COMMENT_BODY_MAX {
            return Err(CommentValidationError::BodyTooLong {
                max: COMMENT_BODY_MAX,
            });
        }
        Ok(Self {
            id,
            offer_price_id,
            project_id,
            author,
            body: body.to_owned(),
            created_at,
        })
    }

    /// Comment identifier.
    pub fn id(&self) -> OfferPriceCommentId {
        self.id
    }

    /// Offer price under discussion.
    pub fn offer_price_id(&self) -> OfferPriceId {
        self.offer_price_id
    }

    /// Project the thread belongs to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Account that wrote the comment.
    pub fn author(&self) -> UserId {
        self.author
    }

    /// Trimmed comment text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Time the comment was posted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
