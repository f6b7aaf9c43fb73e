//! Driving port for membership mutations.

use async_trait::async_trait;

use crate::domain::{Error, MemberSummary, PhoneNumber, ProjectId, UserId};

/// Identifies a membership by project and the member's phone number.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
    pub phone_number: PhoneNumber,
}

/// Driving port for adding and removing project members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectMemberCommand: Send + Sync {
    /// Add the user registered with the phone number to the project.
    async fn add_member(&self, request: MembershipRequest) -> Result<MemberSummary, Error>;

    /// Remove the user registered with the phone number from the project.
    async fn remove_member(&self, request: MembershipRequest) -> Result<(), Error>;
}
