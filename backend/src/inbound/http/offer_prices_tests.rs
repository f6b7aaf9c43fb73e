//! Tests for offer price HTTP handlers.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::OfferPriceResponse;
use crate::domain::{OfferPrice, OfferPriceDraft, OfferPriceId, PricingTender, User, UserRole};
use crate::inbound::http::test_utils::{session_cookie, sign_in_request, test_app};
use crate::test_support::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    owner: User,
    contractor: User,
    outsider: User,
    tender: PricingTender,
}

#[fixture]
fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let owner = store.add_user("Omar", "+966500000001", UserRole::Owner, 3);
    let contractor = store.add_user("Karim", "+966500000002", UserRole::Contractor, 0);
    let outsider = store.add_user("Fahad", "+966500000003", UserRole::Contractor, 0);
    let project = store.add_project(owner.id(), "Villa 12");
    let tender = store.add_tender(project.id(), owner.id(), "Structure");
    store.register_contractor(tender.id, contractor.id());
    Fixture {
        store,
        owner,
        contractor,
        outsider,
        tender,
    }
}

async fn sign_in<S>(app: &S, user: &User) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, sign_in_request(user).to_request()).await;
    session_cookie(&res)
}

fn seed_offer(fixture: &Fixture, title: &str, day: u32) -> OfferPrice {
    let created = Utc
        .with_ymd_and_hms(2024, 5, day, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let offer = OfferPrice::create(
        OfferPriceId::random(),
        fixture.tender.id,
        fixture.contractor.id(),
        OfferPriceDraft {
            title: title.to_owned(),
            amount: 1_000_000,
            notes: None,
        },
        created,
    )
    .expect("valid offer");
    fixture.store.add_offer(offer.clone());
    offer
}

fn submission(fixture: &Fixture) -> Value {
    json!({
        "pricing_tender_id": fixture.tender.id.to_string(),
        "title": "Concrete works",
        "amount": 1_250_000,
        "notes": "excludes steel"
    })
}

#[rstest]
#[actix_web::test]
async fn registered_contractor_submits_an_offer(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.contractor).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/offer-prices")
            .cookie(cookie)
            .set_json(submission(&fixture))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let offer: OfferPriceResponse = actix_test::read_body_json(res).await;
    assert_eq!(offer.amount, 1_250_000);
    assert_eq!(offer.submitted_by, fixture.contractor.id().to_string());
    assert_eq!(offer.notes.as_deref(), Some("excludes steel"));
    assert_eq!(fixture.store.offers().len(), 1);
}

#[rstest]
#[actix_web::test]
async fn unregistered_contractor_cannot_submit(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.outsider).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/offer-prices")
            .cookie(cookie)
            .set_json(submission(&fixture))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(fixture.store.offers().is_empty());
}

#[rstest]
#[actix_web::test]
async fn negative_amount_is_rejected(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.contractor).await;
    let mut body = submission(&fixture);
    body["amount"] = json!(-5);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/offer-prices")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(fixture.store.offers().is_empty());
}

#[rstest]
#[case::unfiltered("", &["Electrical", "Plumbing", "Concrete"])]
#[case::title("?title=CONC", &["Concrete"])]
#[case::inclusive_range("?start_date=2024-05-02&end_date=2024-05-03", &["Electrical", "Plumbing"])]
#[case::start_after_everything("?start_date=2024-06-01", &[])]
#[actix_web::test]
async fn owner_lists_offers_newest_first(
    fixture: Fixture,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    seed_offer(&fixture, "Concrete", 1);
    seed_offer(&fixture, "Plumbing", 2);
    seed_offer(&fixture, "Electrical", 3);
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/offer-prices/{}{query}", fixture.tender.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let offers: Vec<OfferPriceResponse> = actix_test::read_body_json(res).await;
    let titles: Vec<&str> = offers.iter().map(|offer| offer.title.as_str()).collect();
    assert_eq!(titles, expected);
}

#[rstest]
#[case::bad_date("?start_date=May-first", "start_date")]
#[case::inverted("?start_date=2024-05-03&end_date=2024-05-01", "start_date")]
#[actix_web::test]
async fn invalid_date_filters_are_rejected(
    fixture: Fixture,
    #[case] query: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/offer-prices/{}{query}", fixture.tender.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn contractor_cannot_list_the_tender(fixture: Fixture) {
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let cookie = sign_in(&app, &fixture.contractor).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/offer-prices/{}", fixture.tender.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn owner_patches_and_contractor_may_not(fixture: Fixture) {
    let offer = seed_offer(&fixture, "Concrete", 1);
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let uri = format!("/api/v1/offer-prices/{}", offer.id());

    let contractor_cookie = sign_in(&app, &fixture.contractor).await;
    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&uri)
            .cookie(contractor_cookie)
            .set_json(json!({"amount": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let owner_cookie = sign_in(&app, &fixture.owner).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&uri)
            .cookie(owner_cookie)
            .set_json(json!({"amount": 900_000, "notes": "negotiated"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: OfferPriceResponse = actix_test::read_body_json(res).await;
    assert_eq!(updated.amount, 900_000);
    assert_eq!(updated.title, "Concrete");
    assert_eq!(updated.notes.as_deref(), Some("negotiated"));
}

#[rstest]
#[actix_web::test]
async fn owner_deletes_an_offer(fixture: Fixture) {
    let offer = seed_offer(&fixture, "Concrete", 1);
    let app = actix_test::init_service(test_app(fixture.store.http_state())).await;
    let uri = format!("/api/v1/offer-prices/{}", offer.id());

    let contractor_cookie = sign_in(&app, &fixture.contractor).await;
    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(contractor_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    assert_eq!(fixture.store.offers().len(), 1);

    let owner_cookie = sign_in(&app, &fixture.owner).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(owner_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(fixture.store.offers().is_empty());

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(owner_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
