//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`; these
//! wrappers mirror their wire shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation (400).
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No valid session (401).
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action (403).
    #[schema(rename = "forbidden")]
    Forbidden,
    /// A referenced resource does not exist (404).
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate membership, self-membership or a consultant candidate (400).
    #[schema(rename = "conflict")]
    Conflict,
    /// The owner reached their project limit (406).
    #[schema(rename = "quota_exceeded")]
    QuotaExceeded,
    /// The database is unreachable (503).
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server (500).
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "only the project owner may do this")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "6f1d7c44-93b4-4c52-a1cf-2d8b8f0e6a10")]
    trace_id: Option<String>,
    /// Supplementary details, usually `{"code": ..., "field": ...}`.
    details: Option<serde_json::Value>,
}
