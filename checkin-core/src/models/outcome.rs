//! Check-in outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Check-in Outcome
// ============================================================================

/// Terminal state of the check-in stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckinOutcome {
    /// The server granted today's reward.
    Success {
        /// Server message, usually describing the reward.
        message: String,
    },
    /// The account was already checked in today.
    AlreadyDone {
        /// Server message.
        message: String,
    },
    /// Check-in did not happen.
    Failed {
        /// Why it failed.
        reason: FailureReason,
    },
}

impl CheckinOutcome {
    /// Returns true for `Success` and `AlreadyDone`; both end the day's work.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::AlreadyDone { .. })
    }

    /// Short name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Success { .. } => "Checked in",
            Self::AlreadyDone { .. } => "Already checked in",
            Self::Failed { .. } => "Check-in failed",
        }
    }

    /// Server message or failure description.
    pub fn detail(&self) -> String {
        match self {
            Self::Success { message } | Self::AlreadyDone { message } => message.clone(),
            Self::Failed { reason } => reason.to_string(),
        }
    }
}

// ============================================================================
// Failure Reason
// ============================================================================

/// Why a check-in failed.
///
/// A transport failure is kept apart from a server-reported rejection so the
/// operator can tell "panel unreachable" from "panel said no".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// No response after all attempts.
    NoResponse,
    /// A response arrived but no JSON object could be recovered from it.
    Undecodable {
        /// Decoder message.
        detail: String,
    },
    /// The server answered with a non-success code.
    Rejected {
        /// Server message, if any.
        message: String,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response from panel"),
            Self::Undecodable { detail } => write!(f, "unreadable response: {detail}"),
            Self::Rejected { message } => write!(f, "rejected by panel: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_states() {
        assert!(CheckinOutcome::Success { message: "+1GB".into() }.is_success());
        assert!(CheckinOutcome::AlreadyDone { message: String::new() }.is_success());
        assert!(!CheckinOutcome::Failed { reason: FailureReason::NoResponse }.is_success());
    }

    #[test]
    fn test_serialized_shape() {
        let outcome = CheckinOutcome::Failed {
            reason: FailureReason::Rejected { message: "nope".into() },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"]["kind"], "rejected");
        assert_eq!(json["reason"]["message"], "nope");
    }
}
