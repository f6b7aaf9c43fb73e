//! Driving port for project mutations.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectDraft, ProjectId, ProjectPatch, User, UserId};

/// Request to create a project owned by the acting user.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectRequest {
    /// Full account snapshot; the quota is read from it.
    pub actor: User,
    pub draft: ProjectDraft,
}

/// Request to patch a project.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProjectRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
    pub patch: ProjectPatch,
}

/// Request to delete a project.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteProjectRequest {
    pub actor: UserId,
    pub project_id: ProjectId,
}

/// Driving port for project write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a project, failing with `quota_exceeded` once the actor owns
    /// as many projects as their account allows.
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, Error>;

    /// Apply a partial update. Only the owner may do this.
    async fn update_project(&self, request: UpdateProjectRequest) -> Result<Project, Error>;

    /// Permanently delete a project. Only the owner may do this.
    async fn delete_project(&self, request: DeleteProjectRequest) -> Result<(), Error>;
}
