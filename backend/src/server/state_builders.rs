//! Builders wiring the Diesel adapters into the shared HTTP state.

use std::sync::Arc;

use actix_web::web;

use kunooz::inbound::http::state::{HttpState, Repositories};
use kunooz::outbound::persistence::{
    DbPool, DieselOfferPriceCommentRepository, DieselOfferPriceRepository,
    DieselPricingTenderRepository, DieselProjectMemberRepository, DieselProjectRepository,
    DieselUserDirectory,
};

/// Build the shared HTTP state with every port backed by PostgreSQL.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(Repositories {
        users: Arc::new(DieselUserDirectory::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        members: Arc::new(DieselProjectMemberRepository::new(pool.clone())),
        tenders: Arc::new(DieselPricingTenderRepository::new(pool.clone())),
        offer_prices: Arc::new(DieselOfferPriceRepository::new(pool.clone())),
        comments: Arc::new(DieselOfferPriceCommentRepository::new(pool.clone())),
    }))
}
