//! Core error types.

use thiserror::Error;

/// Configuration could not be assembled.
///
/// Always fatal: nothing runs with a partial configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("Missing required setting: {0}")]
    MissingVar(&'static str),

    /// The panel host could not be turned into a base URL.
    #[error("Invalid panel address '{domain}': {reason}")]
    InvalidBaseUrl {
        /// Domain as provided.
        domain: String,
        /// Parser message.
        reason: String,
    },
}
