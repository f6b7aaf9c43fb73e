//! Port for project membership persistence.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Error, MemberSummary, ProjectId, ProjectMember, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership repository adapters.
    pub enum ProjectMemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "project member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project member repository query failed: {message}",
        /// The `(project, member)` pair already exists.
        Duplicate { message: String } => "project membership already exists: {message}",
    }
}

/// Storage for project membership associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectMemberRepository: Send + Sync {
    /// True when `member` belongs to `project`.
    async fn is_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError>;

    /// Persist a new association, failing with `Duplicate` when one exists.
    async fn insert(&self, member: &ProjectMember) -> Result<(), ProjectMemberRepositoryError>;

    /// Remove the association and report whether a row was deleted.
    async fn delete(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectMemberRepositoryError>;

    /// Flattened member identities for `project`, in join order.
    async fn list_member_summaries(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<MemberSummary>, ProjectMemberRepositoryError>;
}

impl From<ProjectMemberRepositoryError> for Error {
    fn from(err: ProjectMemberRepositoryError) -> Self {
        match err {
            ProjectMemberRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            ProjectMemberRepositoryError::Query { message } => Error::internal(message),
            ProjectMemberRepositoryError::Duplicate { .. } => {
                Error::conflict("user is already a member of this project")
                    .with_details(json!({ "code": "duplicate_membership" }))
            }
        }
    }
}
