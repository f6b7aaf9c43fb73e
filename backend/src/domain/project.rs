//! Projects and their memberships.
//!
//! A project belongs to exactly one user, its owner. Other users gain
//! visibility through [`ProjectMember`] associations created by the owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PhoneNumber, ProjectId, ProjectMemberId, User, UserId};

/// Maximum length of a project name, in characters.
pub const PROJECT_NAME_MAX: usize = 120;
/// Maximum length of free-text project fields, in characters.
pub const PROJECT_TEXT_MAX: usize = 2000;

/// Validation errors for project fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("project name must not be empty")]
    EmptyName,
    #[error("project name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("{field} must be at most {max} characters")]
    TextTooLong { field: &'static str, max: usize },
}

fn validate_name(raw: &str) -> Result<String, ProjectValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ProjectValidationError::EmptyName);
    }
    if name.chars().count() > PROJECT_NAME_MAX {
        return Err(ProjectValidationError::NameTooLong {
            max: PROJECT_NAME_MAX,
        });
    }
    Ok(name.to_owned())
}

/// Blank text clears the field.
fn validate_text(
    raw: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ProjectValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if text.chars().count() > PROJECT_TEXT_MAX {
        return Err(ProjectValidationError::TextTooLong {
            field,
            max: PROJECT_TEXT_MAX,
        });
    }
    Ok(Some(text.to_owned()))
}

/// Caller-supplied fields for a new project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Partial update of a project. `None` leaves a field untouched; for the
/// optional text fields an empty string clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl ProjectPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.location.is_none()
    }
}

/// A construction project.
///
/// ## Invariants
/// - `name` is trimmed, non-empty and at most [`PROJECT_NAME_MAX`] characters.
/// - `owner` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner: UserId,
    name: String,
    description: Option<String>,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Create a project for `owner` from a validated draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use kunooz::domain::{Project, ProjectDraft, ProjectId, UserId};
    ///
    /// let owner = UserId::random();
    /// let draft = ProjectDraft { name: " Villa 12 ".into(), ..ProjectDraft::default() };
    /// let project = Project::create(ProjectId::random(), owner, draft, Utc::now())
    ///     .expect("valid draft");
    /// assert_eq!(project.name(), "Villa 12");
    /// assert_eq!(project.owner(), owner);
    /// ```
    pub fn create(
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        Ok(Self {
            id,
            owner,
            name: validate_name(&draft.name)?,
            description: validate_text(draft.description, "description")?,
            location: validate_text(draft.location, "location")?,
            created_at,
        })
    }

    /// Rebuild a project loaded from storage.
    pub fn from_parts(
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        Self::create(id, owner, draft, created_at)
    }

    /// Return a copy with `patch` applied.
    pub fn patched(&self, patch: ProjectPatch) -> Result<Self, ProjectValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = validate_name(&name)?;
        }
        if patch.description.is_some() {
            next.description = validate_text(patch.description, "description")?;
        }
        if patch.location.is_some() {
            next.location = validate_text(patch.location, "location")?;
        }
        Ok(next)
    }

    /// Project identifier.
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Owning account.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Site location, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when `user` owns this project.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}

/// Association granting a user visibility into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: ProjectMemberId,
    pub project_id: ProjectId,
    pub member_id: UserId,
    pub phone_number: PhoneNumber,
}

impl ProjectMember {
    /// Build a fresh association for `member` in `project_id`.
    pub fn new(project_id: ProjectId, member: &User) -> Self {
        Self {
            id: ProjectMemberId::random(),
            project_id,
            member_id: member.id(),
            phone_number: member.phone_number().clone(),
        }
    }
}

/// Flattened member identity returned to project owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: UserId,
    pub first_name: String,
    pub phone_number: PhoneNumber,
}

impl From<&User> for MemberSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().to_owned(),
            phone_number: user.phone_number().clone(),
        }
    }
}
