//! Offer price comment service.
//!
//! Comments are scoped to the project an offer price belongs to through its
//! tender. The project owner and project members may read and post them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::access::ensure_project_participant;
use crate::domain::ports::{
    ListCommentsRequest, OfferPriceCommentCommand, OfferPriceCommentQuery,
    OfferPriceCommentRepository, OfferPriceRepository, PostCommentRequest,
    PricingTenderRepository, ProjectMemberRepository, ProjectRepository,
};
use crate::domain::{
    Error, OfferPrice, OfferPriceComment, OfferPriceCommentId, OfferPriceId, Project, ProjectId,
    UserId,
};

/// Driven ports the comment service reads and writes through.
#[derive(Clone)]
pub struct CommentStores<P, M, T, O, C> {
    pub projects: Arc<P>,
    pub members: Arc<M>,
    pub tenders: Arc<T>,
    pub offers: Arc<O>,
    pub comments: Arc<C>,
}

/// Service implementing [`OfferPriceCommentCommand`] and
/// [`OfferPriceCommentQuery`].
#[derive(Clone)]
pub struct OfferPriceCommentService<P, M, T, O, C> {
    stores: CommentStores<P, M, T, O, C>,
}

impl<P, M, T, O, C> OfferPriceCommentService<P, M, T, O, C> {
    /// Create a new service over the comment thread stores.
    pub fn new(stores: CommentStores<P, M, T, O, C>) -> Self {
        Self { stores }
    }
}

impl<P, M, T, O, C> OfferPriceCommentService<P, M, T, O, C>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    T: PricingTenderRepository,
    O: OfferPriceRepository,
    C: OfferPriceCommentRepository,
{
    async fn project(&self, id: ProjectId) -> Result<Project, Error> {
        self.stores
            .projects
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {id} not found")))
    }

    async fn offer(&self, id: OfferPriceId) -> Result<OfferPrice, Error> {
        self.stores
            .offers
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("offer price {id} not found")))
    }

    /// Project owning the offer, resolved through its tender.
    async fn project_of(&self, offer: &OfferPrice) -> Result<ProjectId, Error> {
        let tender_id = offer.tender_id();
        let tender = self
            .stores
            .tenders
            .find_by_id(&tender_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("pricing tender {tender_id} not found")))?;
        Ok(tender.project_id)
    }

    async fn ensure_participant(&self, actor: UserId, project: &Project) -> Result<(), Error> {
        let is_member = if project.is_owned_by(actor) {
            false
        } else {
            self.stores.members.is_member(&project.id(), &actor).await?
        };
        ensure_project_participant(actor, project, is_member).map_err(|denied| {
            debug!(%actor, project_id = %project.id(), "comment access denied");
            Error::from(denied)
        })
    }
}

#[async_trait]
impl<P, M, T, O, C> OfferPriceCommentCommand for OfferPriceCommentService<P, M, T, O, C>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    T: PricingTenderRepository,
    O: OfferPriceRepository,
    C: OfferPriceCommentRepository,
{
    async fn post_comment(&self, request: PostCommentRequest) -> Result<OfferPriceComment, Error> {
        let project = self.project(request.project_id).await?;
        let offer = self.offer(request.offer_price_id).await?;
        if self.project_of(&offer).await? != project.id() {
            return Err(
                Error::invalid_request("offer price does not belong to this project")
                    .with_details(json!({
                        "code": "offer_price_not_in_project",
                        "field": "offer_price",
                    })),
            );
        }
        self.ensure_participant(request.actor, &project).await?;

        let comment = OfferPriceComment::new(
            OfferPriceCommentId::random(),
            offer.id(),
            project.id(),
            request.actor,
            &request.body,
            Utc::now(),
        )
        .map_err(|err| Error::invalid_request(format!("invalid comment: {err}")))?;
        self.stores.comments.insert(&comment).await?;
        info!(comment_id = %comment.id(), offer_id = %offer.id(), "comment posted");
        Ok(comment)
    }
}

#[async_trait]
impl<P, M, T, O, C> OfferPriceCommentQuery for OfferPriceCommentService<P, M, T, O, C>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    T: PricingTenderRepository,
    O: OfferPriceRepository,
    C: OfferPriceCommentRepository,
{
    async fn list_comments(
        &self,
        request: ListCommentsRequest,
    ) -> Result<Vec<OfferPriceComment>, Error> {
        let offer = self.offer(request.offer_price_id).await?;
        let project_id = self.project_of(&offer).await?;
        let project = self.project(project_id).await?;
        self.ensure_participant(request.actor, &project).await?;
        Ok(self
            .stores
            .comments
            .list_for_offer_price(&offer.id())
            .await?)
    }
}

#[cfg(test)]
#[path = "offer_price_comment_service_tests.rs"]
mod tests;
