//! Tests for the project service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockProjectRepository, ProjectRepositoryError};
use crate::domain::{ErrorCode, PhoneNumber, ProjectDraft, ProjectPatch, User, UserDraft, UserRole};

fn user_with_limit(limit: u32) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        first_name: "Omar".to_owned(),
        phone_number: PhoneNumber::new("0501112233").expect("valid phone"),
        role: UserRole::Consultant,
        projects_limit: limit,
    })
    .expect("valid user")
}

#[fixture]
fn owner() -> User {
    user_with_limit(2)
}

fn draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_owned(),
        ..ProjectDraft::default()
    }
}

fn stored_project(owner: UserId) -> Project {
    Project::create(ProjectId::random(), owner, draft("Mall"), Utc::now()).expect("valid project")
}

#[rstest]
#[tokio::test]
async fn create_inserts_when_under_quota(owner: User) {
    let owner_id = owner.id();
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .with(eq(owner_id))
        .times(1)
        .return_once(|_| Ok(1));
    repo.expect_insert_within_quota()
        .withf(|project, limit| project.name() == "School" && *limit == 2)
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = ProjectService::new(Arc::new(repo));
    let project = service
        .create_project(CreateProjectRequest {
            actor: owner,
            draft: draft("School"),
        })
        .await
        .expect("project created");

    assert_eq!(project.owner(), owner_id);
    assert_eq!(project.name(), "School");
}

#[rstest]
#[case(0, 0)]
#[case(2, 2)]
#[case(3, 2)]
#[tokio::test]
async fn create_over_quota_never_inserts(#[case] owned: u64, #[case] limit: u32) {
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .times(1)
        .return_once(move |_| Ok(owned));
    repo.expect_insert_within_quota().times(0);

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .create_project(CreateProjectRequest {
            actor: user_with_limit(limit),
            draft: draft("School"),
        })
        .await
        .expect_err("quota exceeded");

    assert_eq!(error.code(), ErrorCode::QuotaExceeded);
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_draft_without_inserting(owner: User) {
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .times(1)
        .return_once(|_| Ok(0));
    repo.expect_insert_within_quota().times(0);

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .create_project(CreateProjectRequest {
            actor: owner,
            draft: draft("  "),
        })
        .await
        .expect_err("invalid draft");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn over_quota_wins_over_an_invalid_draft() {
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .times(1)
        .return_once(|_| Ok(5));
    repo.expect_insert_within_quota().times(0);

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .create_project(CreateProjectRequest {
            actor: user_with_limit(1),
            draft: draft("  "),
        })
        .await
        .expect_err("quota exceeded");

    assert_eq!(error.code(), ErrorCode::QuotaExceeded);
    assert_eq!(error.detail_code(), Some("project_quota_exceeded"));
}

#[rstest]
#[tokio::test]
async fn quota_filled_between_count_and_insert_is_refused(owner: User) {
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .times(1)
        .return_once(|_| Ok(1));
    repo.expect_insert_within_quota()
        .times(1)
        .return_once(|_, _| Ok(false));

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .create_project(CreateProjectRequest {
            actor: owner,
            draft: draft("School"),
        })
        .await
        .expect_err("quota exceeded");

    assert_eq!(error.code(), ErrorCode::QuotaExceeded);
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable(owner: User) {
    let mut repo = MockProjectRepository::new();
    repo.expect_count_owned_by()
        .return_once(|_| Err(ProjectRepositoryError::connection("pool exhausted")));

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .create_project(CreateProjectRequest {
            actor: owner,
            draft: draft("School"),
        })
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn list_is_scoped_to_actor(owner: User) {
    let owner_id = owner.id();
    let projects = vec![stored_project(owner_id), stored_project(owner_id)];
    let expected = projects.clone();
    let mut repo = MockProjectRepository::new();
    repo.expect_list_owned_by()
        .with(eq(owner_id))
        .times(1)
        .return_once(move |_| Ok(projects));

    let service = ProjectService::new(Arc::new(repo));
    let listed = service.list_projects(owner_id).await.expect("list");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn get_distinguishes_missing_from_forbidden(owner: User) {
    let project = stored_project(owner.id());
    let project_id = project.id();
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .with(eq(project_id))
        .return_once(move |_| Ok(Some(project)));
    repo.expect_find_by_id()
        .withf(move |id| *id != project_id)
        .return_once(|_| Ok(None));

    let service = ProjectService::new(Arc::new(repo));
    let forbidden = service
        .get_project(GetProjectRequest {
            actor: UserId::random(),
            project_id,
        })
        .await
        .expect_err("forbidden");
    let missing = service
        .get_project(GetProjectRequest {
            actor: owner.id(),
            project_id: ProjectId::random(),
        })
        .await
        .expect_err("missing");

    assert_eq!(forbidden.code(), ErrorCode::Forbidden);
    assert_eq!(missing.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_applies_patch_for_owner(owner: User) {
    let project = stored_project(owner.id());
    let project_id = project.id();
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    repo.expect_update()
        .withf(|project| project.name() == "Mall Phase 2")
        .times(1)
        .return_once(|_| Ok(()));

    let service = ProjectService::new(Arc::new(repo));
    let updated = service
        .update_project(UpdateProjectRequest {
            actor: owner.id(),
            project_id,
            patch: ProjectPatch {
                name: Some("Mall Phase 2".to_owned()),
                ..ProjectPatch::default()
            },
        })
        .await
        .expect("updated");

    assert_eq!(updated.name(), "Mall Phase 2");
}

#[rstest]
#[tokio::test]
async fn delete_by_non_owner_is_forbidden(owner: User) {
    let project = stored_project(owner.id());
    let project_id = project.id();
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    repo.expect_delete().times(0);

    let service = ProjectService::new(Arc::new(repo));
    let error = service
        .delete_project(DeleteProjectRequest {
            actor: UserId::random(),
            project_id,
        })
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.detail_code(), Some("not_project_owner"));
}

#[rstest]
#[tokio::test]
async fn delete_by_owner_removes_project(owner: User) {
    let project = stored_project(owner.id());
    let project_id = project.id();
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    repo.expect_delete()
        .with(eq(project_id))
        .times(1)
        .return_once(|_| Ok(()));

    let service = ProjectService::new(Arc::new(repo));
    service
        .delete_project(DeleteProjectRequest {
            actor: owner.id(),
            project_id,
        })
        .await
        .expect("deleted");
}
