//! Project membership HTTP handlers.
//!
//! ```text
//! POST   /api/v1/project-members               {project, phone_number}
//! GET    /api/v1/project-members/{project_id}
//! DELETE /api/v1/project-members               {project, phone_number}
//! ```
//!
//! Members are addressed by phone number, the identifier owners know their
//! contractors by.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListMembersRequest, MembershipRequest};
use crate::domain::{MemberSummary, ProjectId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_phone_number, parse_uuid};

/// Identifies a membership by project and the member's phone number.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MembershipBody {
    #[schema(format = "uuid")]
    pub project: String,
    #[schema(example = "+966501234567")]
    pub phone_number: String,
}

/// Flattened member view.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MemberSummaryResponse {
    /// The member's user id.
    #[schema(format = "uuid")]
    pub id: String,
    pub first_name: String,
    pub phone_number: String,
}

impl From<MemberSummary> for MemberSummaryResponse {
    fn from(summary: MemberSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            first_name: summary.first_name,
            phone_number: summary.phone_number.into(),
        }
    }
}

fn membership_request(actor: UserId, body: MembershipBody) -> ApiResult<MembershipRequest> {
    Ok(MembershipRequest {
        actor,
        project_id: ProjectId::from_uuid(parse_uuid(&body.project, FieldName::new("project"))?),
        phone_number: parse_phone_number(&body.phone_number, FieldName::new("phone_number"))?,
    })
}

/// Add the user registered with `phone_number` to one of the caller's
/// projects.
#[utoipa::path(
    post,
    path = "/api/v1/project-members",
    request_body = MembershipBody,
    responses(
        (status = 201, description = "Member added", body = MemberSummaryResponse),
        (status = 400, description = "Invalid request, self-membership, duplicate or consultant", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project or user not found", body = ErrorSchema)
    ),
    tags = ["project-members"],
    operation_id = "addProjectMember",
    security(("SessionCookie" = []))
)]
#[post("/project-members")]
pub async fn add_member(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<MembershipBody>,
) -> ApiResult<HttpResponse> {
    let request = membership_request(user.id(), payload.into_inner())?;
    let summary = state.members.add_member(request).await?;
    Ok(HttpResponse::Created().json(MemberSummaryResponse::from(summary)))
}

/// List the members of one of the caller's projects.
#[utoipa::path(
    get,
    path = "/api/v1/project-members/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier", format = "uuid")),
    responses(
        (status = 200, description = "Project members", body = [MemberSummaryResponse]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["project-members"],
    operation_id = "listProjectMembers",
    security(("SessionCookie" = []))
)]
#[get("/project-members/{project_id}")]
pub async fn list_members(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MemberSummaryResponse>>> {
    let project_id = ProjectId::from_uuid(parse_uuid(&path, FieldName::new("project_id"))?);
    let members = state
        .members_query
        .list_members(ListMembersRequest {
            actor: user.id(),
            project_id,
        })
        .await?;
    Ok(web::Json(
        members.into_iter().map(MemberSummaryResponse::from).collect(),
    ))
}

/// Remove a member from one of the caller's projects.
#[utoipa::path(
    delete,
    path = "/api/v1/project-members",
    request_body = MembershipBody,
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project, user or membership not found", body = ErrorSchema)
    ),
    tags = ["project-members"],
    operation_id = "removeProjectMember",
    security(("SessionCookie" = []))
)]
#[delete("/project-members")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<MembershipBody>,
) -> ApiResult<HttpResponse> {
    let request = membership_request(user.id(), payload.into_inner())?;
    state.members.remove_member(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "project_members_tests.rs"]
mod tests;
