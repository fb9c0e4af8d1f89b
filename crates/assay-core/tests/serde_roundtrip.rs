use assay_core::errors::{AssertionError, Diagnostic, Divergence};
use assay_core::MemberConventions;

#[test]
fn assertion_error_round_trip_json() {
    let err = AssertionError::ElementMismatch {
        divergence: Divergence::ValueDiffers { index: 1 },
        info: Diagnostic::new("element-mismatch", "differs at index 1")
            .with_context("path", "the indexer"),
    };
    let json = serde_json::to_string_pretty(&err).expect("serialize");
    assert!(json.contains("\"kind\": \"ElementMismatch\""));
    let decoded: AssertionError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn conventions_fill_omitted_roles_with_defaults() {
    let conventions =
        MemberConventions::from_json_str(r#"{ "acquire": "cursor", "advance": "step" }"#)
            .expect("parse");
    assert_eq!(conventions.acquire, "cursor");
    assert_eq!(conventions.advance, "step");
    assert_eq!(conventions.current, "current");
    assert_eq!(conventions.length, "len");

    let json = conventions.to_json_string().expect("serialize");
    let decoded = MemberConventions::from_json_str(&json).expect("reparse");
    assert_eq!(decoded, conventions);
}

#[test]
fn malformed_conventions_report_config_error() {
    let err = MemberConventions::from_json_str("{ \"acquire\": 7 }").unwrap_err();
    assert!(matches!(err, AssertionError::Config(_)));
    assert_eq!(err.code(), "conventions-parse");
}
