//! Users as seen by the project service: identity, role and project quota.
//!
//! Accounts are created and authenticated elsewhere; this module only models
//! what authorization decisions need.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("phone number must not be empty")]
    EmptyPhoneNumber,
    #[error("phone number must contain 7 to 15 digits with an optional leading +")]
    InvalidPhoneNumber,
    #[error("first name must not be empty")]
    EmptyFirstName,
    #[error("unknown user role: {0}")]
    UnknownRole(String),
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap a UUID loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role tag attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Runs projects and issues pricing tenders.
    Consultant,
    /// Submits offer prices against tenders they are registered on.
    Contractor,
    /// Property owner following a project.
    Owner,
}

impl UserRole {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consultant => "consultant",
            Self::Contractor => "contractor",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consultant" => Ok(Self::Consultant),
            "contractor" => Ok(Self::Contractor),
            "owner" => Ok(Self::Owner),
            _ => Err(UserValidationError::UnknownRole(s.to_owned())),
        }
    }
}

static PHONE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn phone_number_regex() -> &'static Regex {
    PHONE_NUMBER_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]{7,15}$")
            .unwrap_or_else(|error| panic!("phone number regex failed to compile: {error}"))
    })
}

/// Phone number used to look members up.
///
/// ## Invariants
/// - Spaces, dashes, dots and parentheses are stripped on construction.
/// - The remainder is 7 to 15 digits with an optional leading `+`.
///
/// # Examples
/// ```
/// use kunooz::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+966 (50) 123-4567").expect("valid phone");
/// assert_eq!(phone.as_ref(), "+966501234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalise and validate a phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyPhoneNumber);
        }
        let normalised: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        if !phone_number_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidPhoneNumber);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account snapshot used for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    phone_number: PhoneNumber,
    role: UserRole,
    projects_limit: u32,
}

/// Unvalidated user fields, typically loaded from storage.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub first_name: String,
    pub phone_number: PhoneNumber,
    pub role: UserRole,
    pub projects_limit: u32,
}

impl User {
    /// Validate a draft into a [`User`].
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            first_name,
            phone_number,
            role,
            projects_limit,
        } = draft;
        let first_name = first_name.trim().to_owned();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        Ok(Self {
            id,
            first_name,
            phone_number,
            role,
            projects_limit,
        })
    }

    /// Account identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Trimmed first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Normalised phone number.
    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// Account role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Maximum number of projects this user may own.
    pub fn projects_limit(&self) -> u32 {
        self.projects_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0501234567", "0501234567")]
    #[case("+966 50 123 4567", "+966501234567")]
    #[case("(050) 123-45.67", "0501234567")]
    fn phone_numbers_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        let phone = PhoneNumber::new(raw).expect("valid phone");
        assert_eq!(phone.as_ref(), expected);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyPhoneNumber)]
    #[case("12345", UserValidationError::InvalidPhoneNumber)]
    #[case("05x1234567", UserValidationError::InvalidPhoneNumber)]
    #[case("++966501234567", UserValidationError::InvalidPhoneNumber)]
    fn invalid_phone_numbers_are_rejected(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(PhoneNumber::new(raw), Err(expected));
    }

    #[rstest]
    #[case("Consultant", UserRole::Consultant)]
    #[case("contractor", UserRole::Contractor)]
    #[case(" OWNER ", UserRole::Owner)]
    fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: UserRole) {
        assert_eq!(raw.parse::<UserRole>(), Ok(expected));
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        assert!(matches!(
            "admin".parse::<UserRole>(),
            Err(UserValidationError::UnknownRole(_))
        ));
    }

    #[rstest]
    fn user_id_rejects_padded_input() {
        let id = UserId::random().to_string();
        assert_eq!(
            UserId::new(format!(" {id}")),
            Err(UserValidationError::InvalidId)
        );
    }

    #[rstest]
    fn user_requires_first_name() {
        let draft = UserDraft {
            id: UserId::random(),
            first_name: "  ".to_owned(),
            phone_number: PhoneNumber::new("0501234567").expect("valid phone"),
            role: UserRole::Contractor,
            projects_limit: 0,
        };
        assert_eq!(User::new(draft), Err(UserValidationError::EmptyFirstName));
    }
}
