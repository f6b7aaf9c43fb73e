//! Offer price HTTP handlers.
//!
//! ```text
//! GET    /api/v1/offer-prices/{tender_id}?title&start_date&end_date
//! POST   /api/v1/offer-prices
//! PATCH  /api/v1/offer-prices/{id}
//! DELETE /api/v1/offer-prices/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    DeleteOfferRequest, ListOffersRequest, SubmitOfferRequest, UpdateOfferRequest,
};
use crate::domain::{OfferPrice, OfferPriceDraft, OfferPriceId, OfferPricePatch, PricingTenderId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_offer_price_filter, parse_uuid};

/// Optional filters for listing offer prices.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OfferPriceListParams {
    /// Case-insensitive substring of the offer title.
    pub title: Option<String>,
    /// Earliest creation day, inclusive (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Latest creation day, inclusive (`YYYY-MM-DD`).
    pub end_date: Option<String>,
}

/// Request payload for submitting an offer price.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SubmitOfferPriceBody {
    #[schema(format = "uuid")]
    pub pricing_tender_id: String,
    #[schema(example = "Concrete works, phase one")]
    pub title: String,
    /// Amount in minor currency units.
    #[schema(example = 1250000)]
    pub amount: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial offer price update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateOfferPriceBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    /// An empty string clears the notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Offer price representation returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OfferPriceResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub pricing_tender_id: String,
    pub title: String,
    pub amount: i64,
    pub notes: Option<String>,
    #[schema(format = "uuid")]
    pub submitted_by: String,
    #[schema(format = "date-time")]
    pub date_created: String,
}

impl From<OfferPrice> for OfferPriceResponse {
    fn from(offer: OfferPrice) -> Self {
        Self {
            id: offer.id().to_string(),
            pricing_tender_id: offer.tender_id().to_string(),
            title: offer.title().to_owned(),
            amount: offer.amount(),
            notes: offer.notes().map(str::to_owned),
            submitted_by: offer.submitted_by().to_string(),
            date_created: offer.date_created().to_rfc3339(),
        }
    }
}

fn parse_offer_id(raw: &str) -> ApiResult<OfferPriceId> {
    parse_uuid(raw, FieldName::new("id")).map(OfferPriceId::from_uuid)
}

/// List the offers on one of the caller's tenders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/offer-prices/{tender_id}",
    params(
        ("tender_id" = String, Path, description = "Pricing tender identifier", format = "uuid"),
        OfferPriceListParams
    ),
    responses(
        (status = 200, description = "Offer prices", body = [OfferPriceResponse]),
        (status = 400, description = "Invalid identifier or date filter", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the tender", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema)
    ),
    tags = ["offer-prices"],
    operation_id = "listOfferPrices",
    security(("SessionCookie" = []))
)]
#[get("/offer-prices/{tender_id}")]
pub async fn list_offer_prices(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<OfferPriceListParams>,
) -> ApiResult<web::Json<Vec<OfferPriceResponse>>> {
    let tender_id = PricingTenderId::from_uuid(parse_uuid(&path, FieldName::new("tender_id"))?);
    let params = query.into_inner();
    let filter = parse_offer_price_filter(
        params.title.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;
    let offers = state
        .offer_prices_query
        .list_offers(ListOffersRequest {
            actor: user.id(),
            tender_id,
            filter,
        })
        .await?;
    Ok(web::Json(
        offers.into_iter().map(OfferPriceResponse::from).collect(),
    ))
}

/// Submit an offer on a tender as its owner or a registered contractor.
#[utoipa::path(
    post,
    path = "/api/v1/offer-prices",
    request_body = SubmitOfferPriceBody,
    responses(
        (status = 201, description = "Offer price submitted", body = OfferPriceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller may not bid on the tender", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema)
    ),
    tags = ["offer-prices"],
    operation_id = "submitOfferPrice",
    security(("SessionCookie" = []))
)]
#[post("/offer-prices")]
pub async fn submit_offer_price(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<SubmitOfferPriceBody>,
) -> ApiResult<HttpResponse> {
    let SubmitOfferPriceBody {
        pricing_tender_id,
        title,
        amount,
        notes,
    } = payload.into_inner();
    let tender_id = PricingTenderId::from_uuid(parse_uuid(
        &pricing_tender_id,
        FieldName::new("pricing_tender_id"),
    )?);
    let offer = state
        .offer_prices
        .submit_offer(SubmitOfferRequest {
            actor: user.id(),
            tender_id,
            draft: OfferPriceDraft {
                title,
                amount,
                notes,
            },
        })
        .await?;
    Ok(HttpResponse::Created().json(OfferPriceResponse::from(offer)))
}

/// Update an offer. Reserved to the tender owner.
#[utoipa::path(
    patch,
    path = "/api/v1/offer-prices/{id}",
    params(("id" = String, Path, description = "Offer price identifier", format = "uuid")),
    request_body = UpdateOfferPriceBody,
    responses(
        (status = 200, description = "Updated offer price", body = OfferPriceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the tender", body = ErrorSchema),
        (status = 404, description = "Offer price not found", body = ErrorSchema)
    ),
    tags = ["offer-prices"],
    operation_id = "updateOfferPrice",
    security(("SessionCookie" = []))
)]
#[patch("/offer-prices/{id}")]
pub async fn update_offer_price(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<UpdateOfferPriceBody>,
) -> ApiResult<web::Json<OfferPriceResponse>> {
    let offer_id = parse_offer_id(&path)?;
    let UpdateOfferPriceBody {
        title,
        amount,
        notes,
    } = payload.into_inner();
    let offer = state
        .offer_prices
        .update_offer(UpdateOfferRequest {
            actor: user.id(),
            offer_id,
            patch: OfferPricePatch {
                title,
                amount,
                notes,
            },
        })
        .await?;
    Ok(web::Json(OfferPriceResponse::from(offer)))
}

/// Delete an offer. Reserved to the tender owner.
#[utoipa::path(
    delete,
    path = "/api/v1/offer-prices/{id}",
    params(("id" = String, Path, description = "Offer price identifier", format = "uuid")),
    responses(
        (status = 204, description = "Offer price deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the tender", body = ErrorSchema),
        (status = 404, description = "Offer price not found", body = ErrorSchema)
    ),
    tags = ["offer-prices"],
    operation_id = "deleteOfferPrice",
    security(("SessionCookie" = []))
)]
#[delete("/offer-prices/{id}")]
pub async fn delete_offer_price(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let offer_id = parse_offer_id(&path)?;
    state
        .offer_prices
        .delete_offer(DeleteOfferRequest {
            actor: user.id(),
            offer_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "offer_prices_tests.rs"]
mod tests;
