//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    OfferPriceCommand, OfferPriceCommentCommand, OfferPriceCommentQuery,
    OfferPriceCommentRepository, OfferPriceQuery, OfferPriceRepository, PricingTenderRepository,
    ProjectCommand, ProjectMemberCommand, ProjectMemberQuery, ProjectMemberRepository,
    ProjectQuery, ProjectRepository, UserDirectory,
};
use crate::domain::{
    CommentStores, OfferPriceCommentService, OfferPriceService, ProjectMemberService,
    ProjectService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Resolves the session's user id into the acting account.
    pub users: Arc<dyn UserDirectory>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub members: Arc<dyn ProjectMemberCommand>,
    pub members_query: Arc<dyn ProjectMemberQuery>,
    pub offer_prices: Arc<dyn OfferPriceCommand>,
    pub offer_prices_query: Arc<dyn OfferPriceQuery>,
    pub comments: Arc<dyn OfferPriceCommentCommand>,
    pub comments_query: Arc<dyn OfferPriceCommentQuery>,
}

/// Driven port implementations the domain services are built from.
pub struct Repositories<U, P, M, T, O, C> {
    pub users: Arc<U>,
    pub projects: Arc<P>,
    pub members: Arc<M>,
    pub tenders: Arc<T>,
    pub offer_prices: Arc<O>,
    pub comments: Arc<C>,
}

impl HttpState {
    /// Wire every domain service over the given repositories.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use kunooz::inbound::http::state::{HttpState, Repositories};
    /// use kunooz::test_support::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let state = HttpState::from_repositories(Repositories {
    ///     users: store.clone(),
    ///     projects: store.clone(),
    ///     members: store.clone(),
    ///     tenders: store.clone(),
    ///     offer_prices: store.clone(),
    ///     comments: store,
    /// });
    /// let _projects = state.projects.clone();
    /// ```
    pub fn from_repositories<U, P, M, T, O, C>(repos: Repositories<U, P, M, T, O, C>) -> Self
    where
        U: UserDirectory + 'static,
        P: ProjectRepository + 'static,
        M: ProjectMemberRepository + 'static,
        T: PricingTenderRepository + 'static,
        O: OfferPriceRepository + 'static,
        C: OfferPriceCommentRepository + 'static,
    {
        let Repositories {
            users,
            projects,
            members,
            tenders,
            offer_prices,
            comments,
        } = repos;

        let project_service = Arc::new(ProjectService::new(projects.clone()));
        let member_service = Arc::new(ProjectMemberService::new(
            projects.clone(),
            members.clone(),
            users.clone(),
        ));
        let offer_service = Arc::new(OfferPriceService::new(
            tenders.clone(),
            offer_prices.clone(),
        ));
        let comment_service = Arc::new(OfferPriceCommentService::new(CommentStores {
            projects,
            members,
            tenders,
            offers: offer_prices,
            comments,
        }));

        Self {
            users,
            projects: project_service.clone(),
            projects_query: project_service,
            members: member_service.clone(),
            members_query: member_service,
            offer_prices: offer_service.clone(),
            offer_prices_query: offer_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
        }
    }
}
