//! The panel's JSON reply envelope.

use serde_json::Value;

/// `{"ret": <code>, "msg": <text>}` as returned by panel actions.
///
/// Both fields are optional; a missing or non-numeric `ret` is never a
/// success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelReply {
    /// Result code; 1 means success.
    pub ret: Option<i64>,
    /// Human-readable message.
    pub msg: Option<String>,
}

impl PanelReply {
    /// Reads the envelope out of a decoded object.
    pub fn from_value(value: &Value) -> Self {
        Self {
            ret: value.get("ret").and_then(Value::as_i64),
            msg: value
                .get("msg")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Returns true when `ret` is 1.
    pub fn is_ok(&self) -> bool {
        self.ret == Some(1)
    }

    /// The message, or `fallback` when the panel sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.msg
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}
