//! Project membership service.
//!
//! Owners add and remove members by phone number. Lookups run in a fixed
//! order so callers see the same error for the same situation: project,
//! ownership, user, then the membership rules in [`ensure_can_add_member`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::access::{ensure_can_add_member, ensure_project_owner};
use crate::domain::ports::{
    ListMembersRequest, MembershipRequest, ProjectMemberCommand, ProjectMemberQuery,
    ProjectMemberRepository, ProjectRepository, UserDirectory,
};
use crate::domain::{
    Error, MemberSummary, PhoneNumber, Project, ProjectId, ProjectMember, User, UserId,
};

/// Service implementing [`ProjectMemberCommand`] and [`ProjectMemberQuery`].
#[derive(Clone)]
pub struct ProjectMemberService<P, M, U> {
    projects: Arc<P>,
    members: Arc<M>,
    users: Arc<U>,
}

impl<P, M, U> ProjectMemberService<P, M, U> {
    /// Create a new service over the project, membership and user stores.
    pub fn new(projects: Arc<P>, members: Arc<M>, users: Arc<U>) -> Self {
        Self {
            projects,
            members,
            users,
        }
    }
}

impl<P, M, U> ProjectMemberService<P, M, U>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    U: UserDirectory,
{
    async fn owned_project(&self, actor: UserId, id: ProjectId) -> Result<Project, Error> {
        let project = self
            .projects
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {id} not found")))?;
        ensure_project_owner(actor, &project).map_err(|denied| {
            debug!(%actor, project_id = %id, "membership change denied");
            Error::from(denied)
        })?;
        Ok(project)
    }

    async fn user_by_phone(&self, phone_number: &PhoneNumber) -> Result<User, Error> {
        self.users
            .find_by_phone_number(phone_number)
            .await?
            .ok_or_else(|| {
                Error::not_found("no user is registered with this phone number")
                    .with_details(json!({ "code": "unknown_user", "field": "phone_number" }))
            })
    }
}

#[async_trait]
impl<P, M, U> ProjectMemberCommand for ProjectMemberService<P, M, U>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    U: UserDirectory,
{
    async fn add_member(&self, request: MembershipRequest) -> Result<MemberSummary, Error> {
        let project = self
            .owned_project(request.actor, request.project_id)
            .await?;
        let candidate = self.user_by_phone(&request.phone_number).await?;
        let already_member = self
            .members
            .is_member(&project.id(), &candidate.id())
            .await?;

        ensure_can_add_member(request.actor, &project, &candidate, already_member).map_err(
            |denied| {
                debug!(
                    project_id = %project.id(),
                    candidate = %candidate.id(),
                    reason = denied.code(),
                    "member rejected"
                );
                Error::from(denied)
            },
        )?;

        let membership = ProjectMember::new(project.id(), &candidate);
        self.members.insert(&membership).await?;
        info!(project_id = %project.id(), member = %candidate.id(), "member added");
        Ok(MemberSummary::from(&candidate))
    }

    async fn remove_member(&self, request: MembershipRequest) -> Result<(), Error> {
        let project = self
            .owned_project(request.actor, request.project_id)
            .await?;
        let member = self.user_by_phone(&request.phone_number).await?;

        let removed = self.members.delete(&project.id(), &member.id()).await?;
        if !removed {
            return Err(
                Error::not_found("user is not a member of this project")
                    .with_details(json!({ "code": "not_a_member", "field": "phone_number" })),
            );
        }
        info!(project_id = %project.id(), member = %member.id(), "member removed");
        Ok(())
    }
}

#[async_trait]
impl<P, M, U> ProjectMemberQuery for ProjectMemberService<P, M, U>
where
    P: ProjectRepository,
    M: ProjectMemberRepository,
    U: UserDirectory,
{
    async fn list_members(&self, request: ListMembersRequest) -> Result<Vec<MemberSummary>, Error> {
        let project = self
            .owned_project(request.actor, request.project_id)
            .await?;
        Ok(self.members.list_member_summaries(&project.id()).await?)
    }
}

#[cfg(test)]
#[path = "project_member_service_tests.rs"]
mod tests;
