//! In-memory implementation of every driven port.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration suites in `tests/`. It mirrors the database behaviour the
//! services rely on: unique memberships, cascading deletes and the list
//! orderings of the Diesel adapters.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    OfferPriceCommentRepository, OfferPriceCommentRepositoryError, OfferPriceRepository,
    OfferPriceRepositoryError, PricingTenderRepository, PricingTenderRepositoryError,
    ProjectMemberRepository, ProjectMemberRepositoryError, ProjectRepository,
    ProjectRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::{
    MemberSummary, OfferPrice, OfferPriceComment, OfferPriceFilter, OfferPriceId, PhoneNumber,
    PricingTender, PricingTenderId, Project, ProjectDraft, ProjectId, ProjectMember, User,
    UserDraft, UserId, UserRole,
};
use crate::inbound::http::state::{HttpState, Repositories};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    projects: Vec<Project>,
    members: Vec<ProjectMember>,
    tenders: Vec<PricingTender>,
    contractors: Vec<(PricingTenderId, UserId)>,
    offers: Vec<OfferPrice>,
    comments: Vec<OfferPriceComment>,
}

impl Tables {
    fn remove_offer(&mut self, id: OfferPriceId) {
        self.offers.retain(|offer| offer.id() != id);
        self.comments
            .retain(|comment| comment.offer_price_id() != id);
    }
}

/// Shared in-memory tables.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build an [`HttpState`] whose services all read and write this store.
    pub fn http_state(self: &Arc<Self>) -> HttpState {
        HttpState::from_repositories(Repositories {
            users: self.clone(),
            projects: self.clone(),
            members: self.clone(),
            tenders: self.clone(),
            offer_prices: self.clone(),
            comments: self.clone(),
        })
    }

    /// Register an account.
    ///
    /// # Panics
    /// Panics when `phone_number` or `first_name` is invalid.
    pub fn add_user(
        &self,
        first_name: &str,
        phone_number: &str,
        role: UserRole,
        projects_limit: u32,
    ) -> User {
        let user = User::new(UserDraft {
            id: UserId::random(),
            first_name: first_name.to_owned(),
            phone_number: PhoneNumber::new(phone_number).expect("valid fixture phone number"),
            role,
            projects_limit,
        })
        .expect("valid fixture user");
        self.tables().users.push(user.clone());
        user
    }

    /// Store a project directly, bypassing the quota check.
    ///
    /// # Panics
    /// Panics when `name` is not a valid project name.
    pub fn add_project(&self, owner: UserId, name: &str) -> Project {
        let draft = ProjectDraft {
            name: name.to_owned(),
            ..ProjectDraft::default()
        };
        let project =
            Project::create(ProjectId::random(), owner, draft, Utc::now()).expect("valid project");
        self.tables().projects.push(project.clone());
        project
    }

    /// Add `member` to `project` directly.
    pub fn add_member(&self, project: ProjectId, member: &User) {
        self.tables()
            .members
            .push(ProjectMember::new(project, member));
    }

    /// Store a tender on `project`.
    pub fn add_tender(&self, project: ProjectId, owner: UserId, title: &str) -> PricingTender {
        let tender = PricingTender {
            id: PricingTenderId::random(),
            project_id: project,
            owner,
            title: title.to_owned(),
        };
        self.tables().tenders.push(tender.clone());
        tender
    }

    /// Allow `contractor` to submit offers on `tender`.
    pub fn register_contractor(&self, tender: PricingTenderId, contractor: UserId) {
        self.tables().contractors.push((tender, contractor));
    }

    /// Store an offer as-is, keeping its `date_created`.
    pub fn add_offer(&self, offer: OfferPrice) {
        self.tables().offers.push(offer);
    }

    /// Snapshot of stored projects.
    pub fn projects(&self) -> Vec<Project> {
        self.tables().projects.clone()
    }

    /// Snapshot of stored memberships.
    pub fn memberships(&self) -> Vec<ProjectMember> {
        self.tables().members.clone()
    }

    /// Snapshot of stored offer prices.
    pub fn offers(&self) -> Vec<OfferPrice> {
        self.tables().offers.clone()
    }

    /// Snapshot of stored comments.
    pub fn comments(&self) -> Vec<OfferPriceComment> {
        self.tables().comments.clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|user| user.id() == *id)
            .cloned())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|user| user.phone_number() == phone_number)
            .cloned())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn count_owned_by(&self, owner: &UserId) -> Result<u64, ProjectRepositoryError> {
        let count = self
            .tables()
            .projects
            .iter()
            .filter(|project| project.is_owned_by(*owner))
            .count();
        Ok(count as u64)
    }

    async fn insert_within_quota(
        &self,
        project: &Project,
        limit: u32,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut tables = self.tables();
        let owned = tables
            .projects
            .iter()
            .filter(|stored| stored.is_owned_by(project.owner()))
            .count();
        if owned as u64 >= u64::from(limit) {
            return Ok(false);
        }
        tables.projects.push(project.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self
            .tables()
            .projects
            .iter()
            .find(|project| project.id() == *id)
            .cloned())
    }

    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut owned: Vec<Project> = self
            .tables()
            .projects
            .iter()
            .filter(|project| project.is_owned_by(*owner))
            .cloned()
            .collect();
        owned.sort_by_key(Project::created_at);
        Ok(owned)
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut tables = self.tables();
        match tables
            .projects
            .iter_mut()
            .find(|stored| stored.id() == project.id())
        {
            Some(stored) => {
                *stored = project.clone();
                Ok(())
            }
            None => Err(ProjectRepositoryError::query("record not found")),
        }
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectRepositoryError> {
        let mut tables = self.tables();
        let id = *id;
        let tender_ids: Vec<PricingTenderId> = tables
            .tenders
            .iter()
            .filter(|tender| tender.project_id == id)
            .map(|tender| tender.id)
            .collect();
        let offer_ids: Vec<OfferPriceId> = tables
            .offers
            .iter()
            .filter(|offer| tender_ids.contains(&offer.tender_id()))
            .map(OfferPrice::id)
            .collect();
        for offer_id in offer_ids {
            tables.remove_offer(offer_id);
        }
        tables
            .contractors
            .retain(|(tender, _)| !tender_ids.contains(tender));
        tables.tenders.retain(|tender| tender.project_id != id);
        tables.comments.retain(|comment| comment.project_id() != id);
        tables.members.retain(|member| member.project_id != id);
        tables.projects.retain(|project| project.id() != id);
        Ok(())
    }
}

#[async_trait]
impl ProjectMemberRepository for InMemoryStore {
    async fn is_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError> {
        Ok(self
            .tables()
            .members
            .iter()
            .any(|row| row.project_id == *project && row.member_id == *member))
    }

    async fn insert(&self, member: &ProjectMember) -> Result<(), ProjectMemberRepositoryError> {
        let mut tables = self.tables();
        let exists = tables
            .members
            .iter()
            .any(|row| row.project_id == member.project_id && row.member_id == member.member_id);
        if exists {
            return Err(ProjectMemberRepositoryError::duplicate(format!(
                "{} in {}",
                member.member_id, member.project_id
            )));
        }
        tables.members.push(member.clone());
        Ok(())
    }

    async fn delete(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError> {
        let mut tables = self.tables();
        let before = tables.members.len();
        tables
            .members
            .retain(|row| !(row.project_id == *project && row.member_id == *member));
        Ok(tables.members.len() != before)
    }

    async fn list_member_summaries(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<MemberSummary>, ProjectMemberRepositoryError> {
        let tables = self.tables();
        Ok(tables
            .members
            .iter()
            .filter(|row| row.project_id == *project)
            .filter_map(|row| tables.users.iter().find(|user| user.id() == row.member_id))
            .map(MemberSummary::from)
            .collect())
    }
}

#[async_trait]
impl PricingTenderRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: &PricingTenderId,
    ) -> Result<Option<PricingTender>, PricingTenderRepositoryError> {
        Ok(self
            .tables()
            .tenders
            .iter()
            .find(|tender| tender.id == *id)
            .cloned())
    }

    async fn is_contractor(
        &self,
        tender: &PricingTenderId,
        contractor: &UserId,
    ) -> Result<bool, PricingTenderRepositoryError> {
        Ok(self
            .tables()
            .contractors
            .iter()
            .any(|(registered, user)| registered == tender && user == contractor))
    }
}

#[async_trait]
impl OfferPriceRepository for InMemoryStore {
    async fn insert(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError> {
        self.tables().offers.push(offer.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &OfferPriceId,
    ) -> Result<Option<OfferPrice>, OfferPriceRepositoryError> {
        Ok(self
            .tables()
            .offers
            .iter()
            .find(|offer| offer.id() == *id)
            .cloned())
    }

    async fn update(&self, offer: &OfferPrice) -> Result<(), OfferPriceRepositoryError> {
        let mut tables = self.tables();
        match tables
            .offers
            .iter_mut()
            .find(|stored| stored.id() == offer.id())
        {
            Some(stored) => {
                *stored = offer.clone();
                Ok(())
            }
            None => Err(OfferPriceRepositoryError::query("record not found")),
        }
    }

    async fn delete(&self, id: &OfferPriceId) -> Result<(), OfferPriceRepositoryError> {
        self.tables().remove_offer(*id);
        Ok(())
    }

    async fn list_for_tender(
        &self,
        tender: &PricingTenderId,
        filter: &OfferPriceFilter,
    ) -> Result<Vec<OfferPrice>, OfferPriceRepositoryError> {
        let mut offers: Vec<OfferPrice> = self
            .tables()
            .offers
            .iter()
            .filter(|offer| offer.tender_id() == *tender && filter.matches(offer))
            .cloned()
            .collect();
        offers.sort_by_key(|offer| std::cmp::Reverse(offer.date_created()));
        Ok(offers)
    }
}

#[async_trait]
impl OfferPriceCommentRepository for InMemoryStore {
    async fn insert(
        &self,
        comment: &OfferPriceComment,
    ) -> Result<(), OfferPriceCommentRepositoryError> {
        self.tables().comments.push(comment.clone());
        Ok(())
    }

    async fn list_for_offer_price(
        &self,
        offer_price: &OfferPriceId,
    ) -> Result<Vec<OfferPriceComment>, OfferPriceCommentRepositoryError> {
        let mut comments: Vec<OfferPriceComment> = self
            .tables()
            .comments
            .iter()
            .filter(|comment| comment.offer_price_id() == *offer_price)
            .cloned()
            .collect();
        comments.sort_by_key(OfferPriceComment::created_at);
        Ok(comments)
    }
}
