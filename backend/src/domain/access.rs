//! Authorization decisions for projects, memberships and offer prices.
//!
//! Every function here is pure: callers fetch the resource and any relation
//! lookups first, then ask the guard. Denials are typed so services can log
//! them and adapters can map them onto status codes.

use serde_json::json;

use super::{Error, PricingTender, Project, User, UserId, UserRole};

/// Reason an actor was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// Caller does not own the project.
    #[error("only the project owner may perform this action")]
    NotProjectOwner,
    /// Caller does not own the pricing tender.
    #[error("only the tender owner may perform this action")]
    NotTenderOwner,
    /// Caller neither owns the tender nor is registered on it.
    #[error("only the tender owner or a registered contractor may submit offers")]
    NotTenderContractor,
    /// Owner tried to add themselves.
    #[error("you cannot add yourself as a project member")]
    SelfMembership,
    /// Candidate already belongs to the project.
    #[error("user is already a member of this project")]
    DuplicateMembership,
    /// Consultants never become members.
    #[error("consultants cannot be added as project members")]
    ConsultantMember,
    /// Caller is neither the owner nor a member.
    #[error("only the project owner or its members may access these comments")]
    NotProjectParticipant,
}

impl AccessDenied {
    /// Machine code placed in `details.code`.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotProjectOwner => "not_project_owner",
            Self::NotTenderOwner => "not_tender_owner",
            Self::NotTenderContractor => "not_tender_contractor",
            Self::SelfMembership => "self_membership",
            Self::DuplicateMembership => "duplicate_membership",
            Self::ConsultantMember => "consultant_member",
            Self::NotProjectParticipant => "not_a_project_participant",
        }
    }
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        let message = value.to_string();
        let error = match value {
            AccessDenied::NotProjectOwner
            | AccessDenied::NotTenderOwner
            | AccessDenied::NotTenderContractor => Error::forbidden(message),
            AccessDenied::SelfMembership
            | AccessDenied::DuplicateMembership
            | AccessDenied::ConsultantMember => Error::conflict(message),
            // Published clients expect 400 here rather than 403.
            AccessDenied::NotProjectParticipant => Error::invalid_request(message),
        };
        error.with_details(json!({ "code": value.code() }))
    }
}

/// Read or write access to a project and its member list.
pub fn ensure_project_owner(actor: UserId, project: &Project) -> Result<(), AccessDenied> {
    if project.is_owned_by(actor) {
        Ok(())
    } else {
        Err(AccessDenied::NotProjectOwner)
    }
}

/// Listing, updating or deleting offer prices on a tender.
pub fn ensure_tender_owner(actor: UserId, tender: &PricingTender) -> Result<(), AccessDenied> {
    if tender.is_owned_by(actor) {
        Ok(())
    } else {
        Err(AccessDenied::NotTenderOwner)
    }
}

/// Adding `candidate` to `project`.
///
/// Checks run in a fixed order: ownership, self-membership, duplicate
/// membership, then the candidate's role.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use kunooz::domain::access::{AccessDenied, ensure_can_add_member};
/// use kunooz::domain::{
///     PhoneNumber, Project, ProjectDraft, ProjectId, User, UserDraft, UserId, UserRole,
/// };
///
/// let owner = UserId::random();
/// let project = Project::create(
///     ProjectId::random(),
///     owner,
///     ProjectDraft { name: "Clinic".into(), ..ProjectDraft::default() },
///     Utc::now(),
/// )
/// .expect("valid project");
/// let consultant = User::new(UserDraft {
///     id: UserId::random(),
///     first_name: "Huda".into(),
///     phone_number: PhoneNumber::new("0500000001").expect("valid phone"),
///     role: UserRole::Consultant,
///     projects_limit: 3,
/// })
/// .expect("valid user");
///
/// assert_eq!(
///     ensure_can_add_member(owner, &project, &consultant, false),
///     Err(AccessDenied::ConsultantMember),
/// );
/// ```
pub fn ensure_can_add_member(
    actor: UserId,
    project: &Project,
    candidate: &User,
    already_member: bool,
) -> Result<(), AccessDenied> {
    ensure_project_owner(actor, project)?;
    if candidate.id() == actor {
        return Err(AccessDenied::SelfMembership);
    }
    if already_member {
        return Err(AccessDenied::DuplicateMembership);
    }
    if candidate.role() == UserRole::Consultant {
        return Err(AccessDenied::ConsultantMember);
    }
    Ok(())
}

/// Submitting an offer price on `tender`.
pub fn ensure_can_submit_offer(
    actor: UserId,
    tender: &PricingTender,
    is_contractor: bool,
) -> Result<(), AccessDenied> {
    if tender.is_owned_by(actor) || is_contractor {
        Ok(())
    } else {
        Err(AccessDenied::NotTenderContractor)
    }
}

/// Reading or writing comments on offer prices belonging to `project`.
pub fn ensure_project_participant(
    actor: UserId,
    project: &Project,
    is_member: bool,
) -> Result<(), AccessDenied> {
    if project.is_owned_by(actor) || is_member {
        Ok(())
    } else {
        Err(AccessDenied::NotProjectParticipant)
    }
}
