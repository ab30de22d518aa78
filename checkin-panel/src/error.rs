//! Panel-specific errors.

use checkin_fetch::TransportError;
use thiserror::Error;

/// Errors from talking to the panel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The login page did not answer with 200.
    #[error("Login page unavailable (HTTP {0})")]
    LoginPageUnavailable(u16),

    /// The panel rejected the credentials or gave no success signal.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The dashboard served the login page instead.
    #[error("Session expired - dashboard redirected to login")]
    SessionExpired,

    /// No response after all attempts.
    #[error("No response from panel: {0}")]
    Transport(#[from] TransportError),
}

impl PanelError {
    /// Returns true when the panel never answered.
    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_transport_conversion() {
        let err: PanelError = TransportError::Timeout(Duration::from_secs(8)).into();
        assert!(err.is_no_response());
        assert!(err.to_string().starts_with("No response from panel"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PanelError::AuthenticationFailed("邮箱或者密码错误".into()).to_string(),
            "Authentication failed: 邮箱或者密码错误"
        );
        assert_eq!(
            PanelError::LoginPageUnavailable(503).to_string(),
            "Login page unavailable (HTTP 503)"
        );
    }
}
