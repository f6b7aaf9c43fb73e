//! Tests for the offer price comment service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockOfferPriceCommentRepository, MockOfferPriceRepository, MockPricingTenderRepository,
    MockProjectMemberRepository, MockProjectRepository,
};
use crate::domain::{ErrorCode, OfferPriceDraft, PricingTender, PricingTenderId, ProjectDraft};

type Service = OfferPriceCommentService<
    MockProjectRepository,
    MockProjectMemberRepository,
    MockPricingTenderRepository,
    MockOfferPriceRepository,
    MockOfferPriceCommentRepository,
>;

struct World {
    project: Project,
    tender: PricingTender,
    offer: OfferPrice,
}

#[fixture]
fn world() -> World {
    let owner = UserId::random();
    let project = Project::create(
        ProjectId::random(),
        owner,
        ProjectDraft {
            name: "Bridge".to_owned(),
            ..ProjectDraft::default()
        },
        Utc::now(),
    )
    .expect("valid project");
    let tender = PricingTender {
        id: PricingTenderId::random(),
        project_id: project.id(),
        owner,
        title: "Steel".to_owned(),
    };
    let offer = OfferPrice::create(
        OfferPriceId::random(),
        tender.id,
        UserId::random(),
        OfferPriceDraft {
            title: "Rebar".to_owned(),
            amount: 100,
            notes: None,
        },
        Utc::now(),
    )
    .expect("valid offer");
    World {
        project,
        tender,
        offer,
    }
}

struct Mocks {
    projects: MockProjectRepository,
    members: MockProjectMemberRepository,
    tenders: MockPricingTenderRepository,
    offers: MockOfferPriceRepository,
    comments: MockOfferPriceCommentRepository,
}

impl Mocks {
    fn resolving(world: &World, is_member: bool) -> Self {
        let mut projects = MockProjectRepository::new();
        let project = world.project.clone();
        projects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(project.clone())));
        let mut members = MockProjectMemberRepository::new();
        members
            .expect_is_member()
            .returning(move |_, _| Ok(is_member));
        let mut tenders = MockPricingTenderRepository::new();
        let tender = world.tender.clone();
        tenders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tender.clone())));
        let mut offers = MockOfferPriceRepository::new();
        let offer = world.offer.clone();
        offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));
        Self {
            projects,
            members,
            tenders,
            offers,
            comments: MockOfferPriceCommentRepository::new(),
        }
    }

    fn into_service(self) -> Service {
        OfferPriceCommentService::new(CommentStores {
            projects: Arc::new(self.projects),
            members: Arc::new(self.members),
            tenders: Arc::new(self.tenders),
            offers: Arc::new(self.offers),
            comments: Arc::new(self.comments),
        })
    }
}

fn post(world: &World, actor: UserId, body: &str) -> PostCommentRequest {
    PostCommentRequest {
        actor,
        project_id: world.project.id(),
        offer_price_id: world.offer.id(),
        body: body.to_owned(),
    }
}

#[rstest]
#[case::owner(true, false)]
#[case::member(false, true)]
#[tokio::test]
async fn participants_can_post(world: World, #[case] as_owner: bool, #[case] is_member: bool) {
    let actor = if as_owner {
        world.project.owner()
    } else {
        UserId::random()
    };
    let mut mocks = Mocks::resolving(&world, is_member);
    mocks
        .comments
        .expect_insert()
        .withf(move |comment| comment.author() == actor)
        .times(1)
        .return_once(|_| Ok(()));

    let comment = mocks
        .into_service()
        .post_comment(post(&world, actor, "Please itemise"))
        .await
        .expect("comment posted");

    assert_eq!(comment.body(), "Please itemise");
    assert_eq!(comment.project_id(), world.project.id());
}

#[rstest]
#[tokio::test]
async fn outsiders_get_bad_request_on_post(world: World) {
    let mut mocks = Mocks::resolving(&world, false);
    mocks.comments.expect_insert().times(0);

    let error = mocks
        .into_service()
        .post_comment(post(&world, UserId::random(), "hello"))
        .await
        .expect_err("not a participant");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.detail_code(), Some("not_a_project_participant"));
}

#[rstest]
#[tokio::test]
async fn offer_from_other_project_is_rejected(world: World) {
    let mut mocks = Mocks::resolving(&world, true);
    let foreign_tender = PricingTender {
        project_id: ProjectId::random(),
        ..world.tender.clone()
    };
    mocks.tenders = MockPricingTenderRepository::new();
    mocks
        .tenders
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign_tender)));
    mocks.comments.expect_insert().times(0);

    let error = mocks
        .into_service()
        .post_comment(post(&world, world.project.owner(), "hello"))
        .await
        .expect_err("mismatched project");

    assert_eq!(error.detail_code(), Some("offer_price_not_in_project"));
}

#[rstest]
#[tokio::test]
async fn blank_body_is_invalid(world: World) {
    let mut mocks = Mocks::resolving(&world, false);
    mocks.comments.expect_insert().times(0);

    let error = mocks
        .into_service()
        .post_comment(post(&world, world.project.owner(), "   "))
        .await
        .expect_err("blank body");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn missing_offer_is_not_found(world: World) {
    let mut mocks = Mocks::resolving(&world, true);
    mocks.offers = MockOfferPriceRepository::new();
    mocks.offers.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .list_comments(ListCommentsRequest {
            actor: world.project.owner(),
            offer_price_id: OfferPriceId::random(),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn member_lists_comments(world: World) {
    let member = UserId::random();
    let comment = OfferPriceComment::new(
        OfferPriceCommentId::random(),
        world.offer.id(),
        world.project.id(),
        world.project.owner(),
        "first",
        Utc::now(),
    )
    .expect("valid comment");
    let expected = vec![comment.clone()];
    let mut mocks = Mocks::resolving(&world, true);
    mocks
        .comments
        .expect_list_for_offer_price()
        .times(1)
        .return_once(move |_| Ok(vec![comment]));

    let listed = mocks
        .into_service()
        .list_comments(ListCommentsRequest {
            actor: member,
            offer_price_id: world.offer.id(),
        })
        .await
        .expect("listed");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn outsiders_cannot_list(world: World) {
    let mut mocks = Mocks::resolving(&world, false);
    mocks.comments.expect_list_for_offer_price().times(0);

    let error = mocks
        .into_service()
        .list_comments(ListCommentsRequest {
            actor: UserId::random(),
            offer_price_id: world.offer.id(),
        })
        .await
        .expect_err("not a participant");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
