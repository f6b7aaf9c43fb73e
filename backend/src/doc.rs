//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response DTOs, and the session cookie security scheme. The
//! document backs Swagger UI in debug builds and `cargo run --bin
//! openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::offer_price_comments::{CommentResponse, PostCommentBody};
use crate::inbound::http::offer_prices::{
    OfferPriceResponse, SubmitOfferPriceBody, UpdateOfferPriceBody,
};
use crate::inbound::http::project_members::{MemberSummaryResponse, MembershipBody};
use crate::inbound::http::projects::{CreateProjectBody, ProjectResponse, UpdateProjectBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Kunooz backend API",
        description = "Construction projects, their members, offer prices and offer price discussions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::project_members::add_member,
        crate::inbound::http::project_members::list_members,
        crate::inbound::http::project_members::remove_member,
        crate::inbound::http::offer_prices::list_offer_prices,
        crate::inbound::http::offer_prices::submit_offer_price,
        crate::inbound::http::offer_prices::update_offer_price,
        crate::inbound::http::offer_prices::delete_offer_price,
        crate::inbound::http::offer_price_comments::list_comments,
        crate::inbound::http::offer_price_comments::post_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateProjectBody,
        UpdateProjectBody,
        ProjectResponse,
        MembershipBody,
        MemberSummaryResponse,
        SubmitOfferPriceBody,
        UpdateOfferPriceBody,
        OfferPriceResponse,
        PostCommentBody,
        CommentResponse
    )),
    tags(
        (name = "projects", description = "Projects owned by the caller"),
        (name = "project-members", description = "Membership of contractors and suppliers"),
        (name = "offer-prices", description = "Offer prices submitted against pricing tenders"),
        (name = "offer-price-comments", description = "Discussion threads on offer prices"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_uses_snake_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "trace_id");
    }

    #[rstest]
    #[case("/api/v1/projects")]
    #[case("/api/v1/projects/{id}")]
    #[case("/api/v1/project-members")]
    #[case("/api/v1/project-members/{project_id}")]
    #[case("/api/v1/offer-prices")]
    #[case("/api/v1/offer-prices/{tender_id}")]
    #[case("/api/v1/offer-prices/{id}")]
    #[case("/api/v1/offer-price-comments")]
    #[case("/api/v1/offer-price-comments/{offer_price_id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
