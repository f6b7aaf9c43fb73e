//! Tests for offer price comment HTTP handlers.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::CommentResponse;
use crate::domain::{
    OfferPrice, OfferPriceDraft, OfferPriceId, PricingTenderId, Project, User, UserRole,
};
use crate::inbound::http::test_utils::{session_cookie, sign_in_request, test_app};
use crate::test_support::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    owner: User,
    member: User,
    outsider: User,
    project: Project,
    offer: OfferPrice,
}

fn offer_on(store: &InMemoryStore, tender: PricingTenderId, submitted_by: &User) -> OfferPrice {
    let offer = OfferPrice::create(
        OfferPriceId::random(),
        tender,
        submitted_by.id(),
        OfferPriceDraft {
            title: "Concrete works".to_owned(),
            amount: 1_000_000,
            notes: None,
        },
        Utc::now(),
    )
    .expect("valid offer");
    store.add_offer(offer.clone());
    offer
}

#[fixture]
fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let owner = store.add_user("Omar", "+966500000001", UserRole::Owner, 3);
    let member = store.add_user("Karim", "+966500000002", UserRole::Contractor, 0);
    let outsider = store.add_user("Fahad", "+966500000003", UserRole::Contractor, 0);
    let project = store.add_project(owner.id(), "Villa 12");
    store.add_member(project.id(), &member);
    let tender = store.add_tender(project.id(), owner.id(), "Structure");
    let offer = offer_on(&store, tender.id, &member);
    Fixture {
        store,
        owner,
        member,
        outsider,
        project,
        offer,
    }
}

async fn sign_in<S>(app: &S, user: &User) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, sign_in_request(user).to_request()).await;
    session_cookie(&res)
}

fn post_request(
    cookie: Cookie<'static>,
    project: &Project,
    offer: &OfferPrice,
    body: &str,
) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/offer-price-comments")
        .cookie(cookie)
        .set_json(json!({
            "project": project.id().to_string(),
            "offer_price": offer.id().to_string(),
            "body": body,
        }))
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn participants_post_and_read_in_order(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let owner_cookie = sign_in(&app, &fixture.owner).await;
    let member_cookie = sign_in(&app, &fixture.member).await;

    let res = actix_test::call_service(
        &app,
        post_request(owner_cookie, &fixture.project, &fixture.offer, "Split the steel line?"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: CommentResponse = actix_test::read_body_json(res).await;
    assert_eq!(first.author, fixture.owner.id().to_string());
    assert_eq!(first.project, fixture.project.id().to_string());

    let res = actix_test::call_service(
        &app,
        post_request(
            member_cookie.clone(),
            &fixture.project,
            &fixture.offer,
            "Done, see revision.",
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/offer-price-comments/{}", fixture.offer.id()))
            .cookie(member_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let comments: Vec<CommentResponse> = actix_test::read_body_json(res).await;
    let bodies: Vec<&str> = comments.iter().map(|comment| comment.body.as_str()).collect();
    assert_eq!(bodies, ["Split the steel line?", "Done, see revision."]);
}

#[rstest]
#[actix_web::test]
async fn outsiders_get_not_a_project_participant(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.outsider).await;

    let res = actix_test::call_service(
        &app,
        post_request(cookie.clone(), &fixture.project, &fixture.offer, "Let me in"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "not_a_project_participant");
    assert!(fixture.store.comments().is_empty());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/offer-price-comments/{}", fixture.offer.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn offer_from_another_project_is_rejected(fixture: Fixture) {
    let other_project = fixture.store.add_project(fixture.owner.id(), "Warehouse");
    let other_tender = fixture
        .store
        .add_tender(other_project.id(), fixture.owner.id(), "Roofing");
    let foreign_offer = offer_on(&fixture.store, other_tender.id, &fixture.member);
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.owner).await;

    let res = actix_test::call_service(
        &app,
        post_request(cookie, &fixture.project, &foreign_offer, "Wrong thread"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "offer_price_not_in_project");
    assert!(fixture.store.comments().is_empty());
}

#[rstest]
#[actix_web::test]
async fn blank_comment_is_rejected(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.member).await;

    let res = actix_test::call_service(
        &app,
        post_request(cookie, &fixture.project, &fixture.offer, "  "),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(fixture.store.comments().is_empty());
}

#[rstest]
#[actix_web::test]
async fn unknown_offer_is_not_found(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/v1/offer-price-comments/{}",
                OfferPriceId::random()
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
