//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn display_includes_field_when_present() {
    let err = Error::invalid_request("Product name cannot be null or empty").with_field("name");
    assert_eq!(
        err.to_string(),
        "Product name cannot be null or empty (name)"
    );
    assert_eq!(err.message(), "Product name cannot be null or empty");
}

#[rstest]
fn errors_outside_a_request_have_no_trace_id() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::invalid_request("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn sync_scope_is_captured_too() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::sync_scope(trace_id, || Error::internal("boom"));
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
