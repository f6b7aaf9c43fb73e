//! Offer price comment HTTP handlers.
//!
//! ```text
//! GET  /api/v1/offer-price-comments/{offer_price_id}
//! POST /api/v1/offer-price-comments   {project, offer_price, body}
//! ```
//!
//! Only the project owner and project members see or post comments; anyone
//! else gets `400 not_a_project_participant`.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListCommentsRequest, PostCommentRequest};
use crate::domain::{OfferPriceComment, OfferPriceId, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Request payload for posting a comment.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PostCommentBody {
    #[schema(format = "uuid")]
    pub project: String,
    #[schema(format = "uuid")]
    pub offer_price: String,
    #[schema(example = "Can you split the steel line item?")]
    pub body: String,
}

/// Comment returned to participants.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CommentResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub offer_price: String,
    #[schema(format = "uuid")]
    pub project: String,
    #[schema(format = "uuid")]
    pub author: String,
    pub body: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<OfferPriceComment> for CommentResponse {
    fn from(comment: OfferPriceComment) -> Self {
        Self {
            id: comment.id().to_string(),
            offer_price: comment.offer_price_id().to_string(),
            project: comment.project_id().to_string(),
            author: comment.author().to_string(),
            body: comment.body().to_owned(),
            created_at: comment.created_at().to_rfc3339(),
        }
    }
}

/// Comments on an offer price, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/offer-price-comments/{offer_price_id}",
    params(("offer_price_id" = String, Path, description = "Offer price identifier", format = "uuid")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 400, description = "Invalid identifier or caller is not a project participant", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Offer price not found", body = ErrorSchema)
    ),
    tags = ["offer-price-comments"],
    operation_id = "listOfferPriceComments",
    security(("SessionCookie" = []))
)]
#[get("/offer-price-comments/{offer_price_id}")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let offer_price_id =
        OfferPriceId::from_uuid(parse_uuid(&path, FieldName::new("offer_price_id"))?);
    let comments = state
        .comments_query
        .list_comments(ListCommentsRequest {
            actor: user.id(),
            offer_price_id,
        })
        .await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// Post a comment on an offer price of a project the caller participates in.
#[utoipa::path(
    post,
    path = "/api/v1/offer-price-comments",
    request_body = PostCommentBody,
    responses(
        (status = 201, description = "Comment posted", body = CommentResponse),
        (status = 400, description = "Invalid request or caller is not a project participant", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Project or offer price not found", body = ErrorSchema)
    ),
    tags = ["offer-price-comments"],
    operation_id = "postOfferPriceComment",
    security(("SessionCookie" = []))
)]
#[post("/offer-price-comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<PostCommentBody>,
) -> ApiResult<HttpResponse> {
    let PostCommentBody {
        project,
        offer_price,
        body,
    } = payload.into_inner();
    let comment = state
        .comments
        .post_comment(PostCommentRequest {
            actor: user.id(),
            project_id: ProjectId::from_uuid(parse_uuid(&project, FieldName::new("project"))?),
            offer_price_id: OfferPriceId::from_uuid(parse_uuid(
                &offer_price,
                FieldName::new("offer_price"),
            )?),
            body,
        })
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

#[cfg(test)]
#[path = "offer_price_comments_tests.rs"]
mod tests;
