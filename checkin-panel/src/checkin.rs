//! Check-in flow.

use checkin_core::{CheckinConfig, CheckinOutcome, FailureReason, SessionCredential};
use checkin_fetch::{RequestDescriptor, Transport, decode_json};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::client::configured;
use crate::endpoints::{
    ALREADY_CHECKED_IN_MARKER, CHECKIN_PATH, DASHBOARD_PATH, FORM_CONTENT_TYPE,
};
use crate::reply::PanelReply;

/// Submits today's check-in.
///
/// Never fails: transport and decode problems become
/// [`CheckinOutcome::Failed`] with their own [`FailureReason`].
#[instrument(skip_all, fields(host = config.host()))]
pub async fn checkin(
    config: &CheckinConfig,
    transport: &Transport,
    credential: &SessionCredential,
) -> CheckinOutcome {
    info!("Submitting check-in");

    let request = configured(config, RequestDescriptor::post(config.endpoint(CHECKIN_PATH)))
        .header("Origin", config.origin())
        .header("Referer", config.endpoint(DASHBOARD_PATH))
        .header("Cookie", credential.header_value())
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Content-Type", FORM_CONTENT_TYPE);

    let response = match transport.execute(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Check-in request got no response");
            return CheckinOutcome::Failed {
                reason: FailureReason::NoResponse,
            };
        }
    };

    let outcome = match decode_json(&response) {
        Ok(value) => classify(&value),
        Err(e) => {
            error!(error = %e, hex = e.hex_preview(), "Check-in response unreadable");
            CheckinOutcome::Failed {
                reason: FailureReason::Undecodable {
                    detail: e.to_string(),
                },
            }
        }
    };

    match &outcome {
        CheckinOutcome::Success { message } => info!(message = %message, "Checked in"),
        CheckinOutcome::AlreadyDone { message } => warn!(message = %message, "Already checked in today"),
        CheckinOutcome::Failed { reason } => error!(reason = %reason, "Check-in failed"),
    }

    outcome
}

/// Classifies a decoded check-in reply.
pub fn classify(value: &Value) -> CheckinOutcome {
    let reply = PanelReply::from_value(value);

    if reply.is_ok() {
        return CheckinOutcome::Success {
            message: reply.message_or("reward granted"),
        };
    }

    match reply.msg {
        Some(message) if message.contains(ALREADY_CHECKED_IN_MARKER) => {
            CheckinOutcome::AlreadyDone { message }
        }
        _ => CheckinOutcome::Failed {
            reason: FailureReason::Rejected {
                message: reply.message_or("unknown error"),
            },
        },
    }
}
