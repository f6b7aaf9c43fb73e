//! Project domain service.
//!
//! Implements the project driving ports: quota-checked creation and
//! owner-only reads, updates and deletes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::access::ensure_project_owner;
use crate::domain::ports::{
    CreateProjectRequest, DeleteProjectRequest, GetProjectRequest, ProjectCommand, ProjectQuery,
    ProjectRepository, UpdateProjectRequest,
};
use crate::domain::{Error, Project, ProjectId, ProjectValidationError, UserId};

pub(crate) fn invalid_project(err: ProjectValidationError) -> Error {
    Error::invalid_request(format!("invalid project: {err}"))
}

fn quota_exceeded(limit: u32) -> Error {
    Error::quota_exceeded("you have reached the number of projects your account allows")
        .with_details(json!({ "code": "project_quota_exceeded", "limit": limit }))
}

fn project_not_found(id: ProjectId) -> Error {
    Error::not_found(format!("project {id} not found"))
}

/// Service implementing [`ProjectCommand`] and [`ProjectQuery`].
#[derive(Clone)]
pub struct ProjectService<P> {
    projects: Arc<P>,
}

impl<P> ProjectService<P> {
    /// Create a new service over the project repository.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

impl<P> ProjectService<P>
where
    P: ProjectRepository,
{
    /// Load a project and confirm `actor` owns it.
    async fn owned_project(&self, actor: UserId, id: ProjectId) -> Result<Project, Error> {
        let project = self
            .projects
            .find_by_id(&id)
            .await?
            .ok_or_else(|| project_not_found(id))?;
        ensure_project_owner(actor, &project).map_err(|denied| {
            debug!(%actor, project_id = %id, reason = denied.code(), "project access denied");
            Error::from(denied)
        })?;
        Ok(project)
    }
}

#[async_trait]
impl<P> ProjectCommand for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, Error> {
        let CreateProjectRequest { actor, draft } = request;
        let limit = actor.projects_limit();

        // Quota comes first: an owner at the limit is refused whatever the body.
        let owned = self.projects.count_owned_by(&actor.id()).await?;
        if owned >= u64::from(limit) {
            debug!(actor = %actor.id(), owned, limit, "project quota reached");
            return Err(quota_exceeded(limit));
        }

        let project = Project::create(ProjectId::random(), actor.id(), draft, Utc::now())
            .map_err(invalid_project)?;
        if !self.projects.insert_within_quota(&project, limit).await? {
            debug!(actor = %actor.id(), limit, "project quota filled by a concurrent create");
            return Err(quota_exceeded(limit));
        }

        info!(project_id = %project.id(), owner = %actor.id(), "project created");
        Ok(project)
    }

    async fn update_project(&self, request: UpdateProjectRequest) -> Result<Project, Error> {
        let project = self
            .owned_project(request.actor, request.project_id)
            .await?;
        let updated = project.patched(request.patch).map_err(invalid_project)?;
        self.projects.update(&updated).await?;
        info!(project_id = %updated.id(), "project updated");
        Ok(updated)
    }

    async fn delete_project(&self, request: DeleteProjectRequest) -> Result<(), Error> {
        let project = self
            .owned_project(request.actor, request.project_id)
            .await?;
        self.projects.delete(&project.id()).await?;
        info!(project_id = %project.id(), "project deleted");
        Ok(())
    }
}

#[async_trait]
impl<P> ProjectQuery for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn list_projects(&self, actor: UserId) -> Result<Vec<Project>, Error> {
        Ok(self.projects.list_owned_by(&actor).await?)
    }

    async fn get_project(&self, request: GetProjectRequest) -> Result<Project, Error> {
        self.owned_project(request.actor, request.project_id).await
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
