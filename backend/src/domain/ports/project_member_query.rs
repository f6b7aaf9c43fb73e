//! Driving port for membership reads.

use async_trait::async_trait;

use crate::domain::{Error, MemberSummary, ProjectId, UserId};

/// Request to list the members of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMembersRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
}

/// Driving port for reading project membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectMemberQuery: Send + Sync {
    /// Members of a project, visible to its owner only.
    async fn list_members(&self, request: ListMembersRequest) -> Result<Vec<MemberSummary>, Error>;
}
