//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UserDirectory`]) are implemented by the
//! persistence adapters. Driving ports (`*Command`, `*Query`) are implemented
//! by the domain services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod offer_price_command;
mod offer_price_comment_command;
mod offer_price_comment_query;
mod offer_price_comment_repository;
mod offer_price_query;
mod offer_price_repository;
mod pricing_tender_repository;
mod project_command;
mod project_member_command;
mod project_member_query;
mod project_member_repository;
mod project_query;
mod project_repository;
mod user_directory;

#[cfg(test)]
pub use offer_price_command::MockOfferPriceCommand;
pub use offer_price_command::{
    DeleteOfferRequest, OfferPriceCommand, SubmitOfferRequest, UpdateOfferRequest,
};
#[cfg(test)]
pub use offer_price_comment_command::MockOfferPriceCommentCommand;
pub use offer_price_comment_command::{OfferPriceCommentCommand, PostCommentRequest};
#[cfg(test)]
pub use offer_price_comment_query::MockOfferPriceCommentQuery;
pub use offer_price_comment_query::{ListCommentsRequest, OfferPriceCommentQuery};
#[cfg(test)]
pub use offer_price_comment_repository::MockOfferPriceCommentRepository;
pub use offer_price_comment_repository::{
    OfferPriceCommentRepository, OfferPriceCommentRepositoryError,
};
#[cfg(test)]
pub use offer_price_query::MockOfferPriceQuery;
pub use offer_price_query::{ListOffersRequest, OfferPriceQuery};
#[cfg(test)]
pub use offer_price_repository::MockOfferPriceRepository;
pub use offer_price_repository::{OfferPriceRepository, OfferPriceRepositoryError};
#[cfg(test)]
pub use pricing_tender_repository::MockPricingTenderRepository;
pub use pricing_tender_repository::{PricingTenderRepository, PricingTenderRepositoryError};
#[cfg(test)]
pub use project_command::MockProjectCommand;
pub use project_command::{
    CreateProjectRequest, DeleteProjectRequest, ProjectCommand, UpdateProjectRequest,
};
#[cfg(test)]
pub use project_member_command::MockProjectMemberCommand;
pub use project_member_command::{MembershipRequest, ProjectMemberCommand};
#[cfg(test)]
pub use project_member_query::MockProjectMemberQuery;
pub use project_member_query::{ListMembersRequest, ProjectMemberQuery};
#[cfg(test)]
pub use project_member_repository::MockProjectMemberRepository;
pub use project_member_repository::{ProjectMemberRepository, ProjectMemberRepositoryError};
#[cfg(test)]
pub use project_query::MockProjectQuery;
pub use project_query::{GetProjectRequest, ProjectQuery};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
