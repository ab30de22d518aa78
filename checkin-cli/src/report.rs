//! Run report.

use std::time::Duration;

use chrono::{DateTime, Utc};
use checkin_core::{AccountInfo, CheckinOutcome};
use serde::{Serialize, Serializer};
use tracing::{error, info, warn};

/// How the run ended overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunVerdict {
    /// Checked in and read the dashboard.
    Complete,
    /// Checked in, but the dashboard could not be read.
    Degraded,
    /// No successful check-in.
    Failed,
}

/// Everything one run produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Panel host.
    pub host: String,
    /// Masked account identifier.
    pub account: String,
    /// Login failure, when the run stopped there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_error: Option<String>,
    /// Check-in result; absent when login failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin: Option<CheckinOutcome>,
    /// Dashboard fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_info: Option<AccountInfo>,
    /// Dashboard failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_error: Option<String>,
    /// Wall-clock duration of the run.
    #[serde(rename = "elapsedSecs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// When the run finished.
    #[serde(serialize_with = "serialize_datetime")]
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Creates a report with no stage results yet.
    pub fn new(host: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            account: account.into(),
            login_error: None,
            checkin: None,
            account_info: None,
            info_error: None,
            elapsed: Duration::ZERO,
            finished_at: Utc::now(),
        }
    }

    /// Stamps the elapsed time and finish timestamp.
    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self.finished_at = Utc::now();
        self
    }

    /// Returns true when the check-in succeeded or was already done.
    pub fn succeeded(&self) -> bool {
        self.checkin.as_ref().is_some_and(CheckinOutcome::is_success)
    }

    /// Overall verdict.
    pub fn verdict(&self) -> RunVerdict {
        match (self.succeeded(), &self.info_error) {
            (false, _) => RunVerdict::Failed,
            (true, Some(_)) => RunVerdict::Degraded,
            (true, None) => RunVerdict::Complete,
        }
    }

    /// Logs the closing summary line.
    pub fn log_summary(&self) {
        let secs = self.elapsed.as_secs_f64();
        match self.verdict() {
            RunVerdict::Complete => info!(elapsed_secs = secs, "Run complete in {secs:.2}s"),
            RunVerdict::Degraded => warn!(
                elapsed_secs = secs,
                "Checked in but info retrieval degraded, took {secs:.2}s"
            ),
            RunVerdict::Failed => error!(elapsed_secs = secs, "Run failed after {secs:.2}s"),
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

fn serialize_secs<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_f64((d.as_secs_f64() * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_core::FailureReason;

    fn report(outcome: Option<CheckinOutcome>, info_error: Option<&str>) -> RunReport {
        RunReport {
            checkin: outcome,
            info_error: info_error.map(str::to_string),
            ..RunReport::new("ikuuu.ch", "ali***example.com")
        }
    }

    #[test]
    fn test_verdicts() {
        let done = CheckinOutcome::AlreadyDone {
            message: "您今日已经签到".into(),
        };
        let failed = CheckinOutcome::Failed {
            reason: FailureReason::NoResponse,
        };

        assert_eq!(report(Some(done.clone()), None).verdict(), RunVerdict::Complete);
        assert_eq!(
            report(Some(done), Some("Session expired")).verdict(),
            RunVerdict::Degraded
        );
        assert_eq!(report(Some(failed), None).verdict(), RunVerdict::Failed);
        assert_eq!(report(None, None).verdict(), RunVerdict::Failed);
        assert!(!report(None, None).succeeded());
    }

    #[test]
    fn test_json_shape() {
        let report = report(
            Some(CheckinOutcome::Success {
                message: "+1GB".into(),
            }),
            None,
        )
        .finish(Duration::from_millis(2250));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["host"], "ikuuu.ch");
        assert_eq!(json["checkin"]["status"], "success");
        assert_eq!(json["elapsedSecs"], 2.25);
        assert!(json["finishedAt"].as_str().unwrap().contains('T'));
        assert!(json.get("loginError").is_none());
        assert!(json.get("accountInfo").is_none());
    }
}
