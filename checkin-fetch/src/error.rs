//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Transport Error
// ============================================================================

/// A request produced no usable response.
///
/// `Timeout`, `Connection` and `Other` are retried; callers see any of them
/// as "no response" once attempts run out.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The attempt exceeded its time bound.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection could not be established or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure raised by the HTTP stack.
    #[error("Request failed: {0}")]
    Other(String),

    /// A header built by the caller is not valid HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl TransportError {
    /// Returns true if another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidHeader { .. })
    }

    /// Classifies a reqwest error raised during an attempt bounded by `timeout`.
    pub fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

// ============================================================================
// Decode Error
// ============================================================================

/// No JSON object could be recovered from a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body parsed, but not as a JSON object.
    #[error("No JSON object in response (first bytes: {hex_preview})")]
    NoJsonObject {
        /// Hex rendering of the first raw body bytes.
        hex_preview: String,
    },

    /// The cleaned-up body still failed to parse.
    #[error("Malformed JSON after cleanup: {source} (first bytes: {hex_preview})")]
    Malformed {
        /// Parser error.
        #[source]
        source: serde_json::Error,
        /// Hex rendering of the first raw body bytes.
        hex_preview: String,
    },
}

impl DecodeError {
    /// Hex rendering of the first raw body bytes.
    pub fn hex_preview(&self) -> &str {
        match self {
            Self::NoJsonObject { hex_preview } | Self::Malformed { hex_preview, .. } => hex_preview,
        }
    }
}
