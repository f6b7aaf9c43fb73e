//! HTTP inbound adapter exposing the REST endpoints.

pub mod current_user;
pub mod error;
pub mod health;
pub mod offer_price_comments;
pub mod offer_prices;
pub mod project_members;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use kunooz::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(project_members::add_member)
        .service(project_members::list_members)
        .service(project_members::remove_member)
        .service(offer_prices::list_offer_prices)
        .service(offer_prices::submit_offer_price)
        .service(offer_prices::update_offer_price)
        .service(offer_prices::delete_offer_price)
        .service(offer_price_comments::list_comments)
        .service(offer_price_comments::post_comment);
}
