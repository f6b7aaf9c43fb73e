//! Driving port for project reads.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, UserId};

/// Request to fetch a single project.
#[derive(Debug, Clone, PartialEq)]
pub struct GetProjectRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
}

/// Driving port for project read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Projects owned by `actor`. Never a global listing.
    async fn list_projects(&self, actor: UserId) -> Result<Vec<Project>, Error>;

    /// A single project, visible to its owner only.
    async fn get_project(&self, request: GetProjectRequest) -> Result<Project, Error>;
}
