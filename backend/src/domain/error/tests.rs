//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("dup"), ErrorCode::Conflict)]
#[case(Error::quota_exceeded("limit"), ErrorCode::QuotaExceeded)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::Forbidden, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::forbidden("nope").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_outside_request_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_inside_request_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::forbidden("nope") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_payload() {
    let error = Error::conflict("already a member")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "code": "duplicate_membership" }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value["code"], "conflict");
    assert_eq!(value["message"], "already a member");
    assert_eq!(value["trace_id"], TRACE_ID);
    assert_eq!(value["details"]["code"], "duplicate_membership");
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("gone")).expect("serialise error");
    assert!(value.get("trace_id").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_payload_trace_id_only(trace_id: TraceId) {
    let payload = json!({ "code": "forbidden", "message": "nope" });
    let decoded: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("decode error")
    })
    .await;
    assert!(decoded.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "forbidden", "message": "" });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[rstest]
fn detail_code_reads_nested_code() {
    let error = Error::not_found("missing").with_details(json!({ "code": "not_a_member" }));
    assert_eq!(error.detail_code(), Some("not_a_member"));
    assert_eq!(Error::not_found("missing").detail_code(), None);
}
