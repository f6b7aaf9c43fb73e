//! Port for project persistence.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Storage for projects and their owner relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Count the projects owned by `owner`.
    async fn count_owned_by(&self, owner: &UserId) -> Result<u64, ProjectRepositoryError>;

    /// Persist `project` unless its owner already holds `limit` projects.
    ///
    /// Returns `false` without writing when the quota is full. The count and
    /// the insert form one unit, so concurrent creates for the same owner
    /// cannot both pass the check.
    async fn insert_within_quota(
        &self,
        project: &Project,
        limit: u32,
    ) -> Result<bool, ProjectRepositoryError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// List the projects owned by `owner`, oldest first.
    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Overwrite the mutable fields of an existing project.
    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Remove a project. Memberships, tenders and comments go with it.
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectRepositoryError>;
}

impl From<ProjectRepositoryError> for Error {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::Connection { message } => Error::service_unavailable(message),
            ProjectRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
