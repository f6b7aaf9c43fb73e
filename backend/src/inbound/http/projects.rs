//! Project HTTP handlers.
//!
//! ```text
//! GET    /api/v1/projects
//! POST   /api/v1/projects
//! GET    /api/v1/projects/{id}
//! PATCH  /api/v1/projects/{id}
//! DELETE /api/v1/projects/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateProjectRequest, DeleteProjectRequest, GetProjectRequest, UpdateProjectRequest,
};
use crate::domain::{Project, ProjectDraft, ProjectId, ProjectPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Request payload for creating a project.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateProjectBody {
    #[schema(example = "Villa 12")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Partial project update. Omitted fields are left unchanged; an empty
/// `description` or `location` clears it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProjectBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Project representation returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProjectResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id().to_string(),
            owner: project.owner().to_string(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            location: project.location().map(str::to_owned),
            created_at: project.created_at().to_rfc3339(),
        }
    }
}

fn parse_project_id(raw: &str) -> ApiResult<ProjectId> {
    parse_uuid(raw, FieldName::new("id")).map(ProjectId::from_uuid)
}

/// List the projects owned by the caller, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects owned by the caller", body = [ProjectResponse]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security(("SessionCookie" = []))
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let projects = state.projects_query.list_projects(user.id()).await?;
    Ok(web::Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Create a project owned by the caller.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use kunooz::inbound::http::projects::create_project;
///
/// let app = App::new().service(web::scope("/api/v1").service(create_project));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 406, description = "Project quota exceeded", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject",
    security(("SessionCookie" = []))
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let CreateProjectBody {
        name,
        description,
        location,
    } = payload.into_inner();
    let project = state
        .projects
        .create_project(CreateProjectRequest {
            actor: user.into_inner(),
            draft: ProjectDraft {
                name,
                description,
                location,
            },
        })
        .await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// Fetch one of the caller's projects.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project identifier", format = "uuid")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security(("SessionCookie" = []))
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let project_id = parse_project_id(&path)?;
    let project = state
        .projects_query
        .get_project(GetProjectRequest {
            actor: user.id(),
            project_id,
        })
        .await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

/// Partially update one of the caller's projects.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project identifier", format = "uuid")),
    request_body = UpdateProjectBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject",
    security(("SessionCookie" = []))
)]
#[patch("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectBody>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let project_id = parse_project_id(&path)?;
    let UpdateProjectBody {
        name,
        description,
        location,
    } = payload.into_inner();
    let project = state
        .projects
        .update_project(UpdateProjectRequest {
            actor: user.id(),
            project_id,
            patch: ProjectPatch {
                name,
                description,
                location,
            },
        })
        .await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

/// Permanently delete one of the caller's projects.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project identifier", format = "uuid")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the project", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject",
    security(("SessionCookie" = []))
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let project_id = parse_project_id(&path)?;
    state
        .projects
        .delete_project(DeleteProjectRequest {
            actor: user.id(),
            project_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
