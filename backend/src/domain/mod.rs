//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for projects, memberships, tenders
//! and offer prices, the authorization guard deciding who may touch them, and
//! the services implementing the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, UserRole, PhoneNumber: the acting identity.
//! - Project, ProjectMember, MemberSummary: projects and membership.
//! - PricingTender, OfferPrice, OfferPriceFilter: tenders and offers.
//! - OfferPriceComment: discussion on offers.
//! - `access`: pure authorization decisions.
//! - `ports`: driving and driven port traits.

pub mod access;
pub mod comment;
pub mod error;
pub mod ids;
pub mod offer_price_comment_service;
pub mod offer_price_service;
pub mod ports;
pub mod project;
pub mod project_member_service;
pub mod project_service;
pub mod tender;
pub mod trace_id;
pub mod user;

pub use self::access::AccessDenied;
pub use self::comment::{COMMENT_BODY_MAX, CommentValidationError, OfferPriceComment};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    OfferPriceCommentId, OfferPriceId, PricingTenderId, ProjectId, ProjectMemberId,
};
pub use self::offer_price_comment_service::{CommentStores, OfferPriceCommentService};
pub use self::offer_price_service::OfferPriceService;
pub use self::project::{
    MemberSummary, PROJECT_NAME_MAX, PROJECT_TEXT_MAX, Project, ProjectDraft, ProjectMember,
    ProjectPatch, ProjectValidationError,
};
pub use self::project_member_service::ProjectMemberService;
pub use self::project_service::ProjectService;
pub use self::tender::{
    OFFER_NOTES_MAX, OFFER_TITLE_MAX, OfferPrice, OfferPriceDraft, OfferPriceFilter,
    OfferPriceFilterError, OfferPricePatch, OfferPriceValidationError, PricingTender,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PhoneNumber, User, UserDraft, UserId, UserRole, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use kunooz::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
