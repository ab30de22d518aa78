//! Integration tests for core model types.

use checkin_core::{
    AccountInfo, CheckinOutcome, ExtractionMode, FailureReason, InfoCategory, InfoField,
    SessionCredential,
};

#[test]
fn test_account_info_json_shape() {
    let info = AccountInfo {
        fields: vec![
            InfoField::new(InfoCategory::Membership, "30 天"),
            InfoField::new(InfoCategory::Numeric, "15.2 GB"),
        ],
        mode: ExtractionMode::NumericFallback,
        unwrapped: true,
    };

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["mode"], "numeric_fallback");
    assert_eq!(json["unwrapped"], true);
    assert_eq!(json["fields"][0]["category"], "membership");
    assert_eq!(json["fields"][1]["value"], "15.2 GB");
}

#[test]
fn test_outcome_detail() {
    let failed = CheckinOutcome::Failed {
        reason: FailureReason::NoResponse,
    };
    assert_eq!(failed.detail(), "no response from panel");

    let done = CheckinOutcome::AlreadyDone {
        message: "您今日已经签到".to_string(),
    };
    assert_eq!(done.detail(), "您今日已经签到");
    assert_eq!(done.display_name(), "Already checked in");
}

#[test]
fn test_credential_from_header_matches_pairs() {
    let a = SessionCredential::from_cookie_header("uid=1; key=k").unwrap();
    let b = SessionCredential::from_pairs([("uid", "1"), ("key", "k")]).unwrap();
    assert_eq!(a, b);
}
