//! Run configuration.
//!
//! The configuration is assembled once at process start from explicit
//! overrides and environment variables, then passed by reference into every
//! flow. Nothing reads the environment after this point.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable holding the account identifier (email).
pub const ENV_EMAIL: &str = "IKUUU_EMAIL";

/// Environment variable holding the account secret.
pub const ENV_PASSWORD: &str = "IKUUU_PASSWORD";

/// Environment variable overriding the panel host.
pub const ENV_DOMAIN: &str = "IKUUU_DOMAIN";

/// Panel host used when neither an override nor the environment names one.
pub const DEFAULT_DOMAIN: &str = "ikuuu.ch";

/// Per-attempt request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Total attempts per request, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Backoff unit; the wait before attempt `n + 1` is `n * unit`.
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

/// Pause between login, check-in, and dashboard stages.
const DEFAULT_STAGE_PAUSE: Duration = Duration::from_secs(1);

// ============================================================================
// Config
// ============================================================================

/// Everything one run needs to know.
#[derive(Clone)]
pub struct CheckinConfig {
    /// Account identifier (email address).
    pub email: String,
    /// Account secret.
    pub password: String,
    /// Panel base URL, without trailing slash.
    pub base_url: Url,
    /// Timeout bound for each request attempt.
    pub timeout: Duration,
    /// Total attempts per request.
    pub max_attempts: u32,
    /// Linear backoff unit between attempts.
    pub retry_base_delay: Duration,
    /// Pause between stages.
    pub stage_pause: Duration,
}

impl CheckinConfig {
    /// Creates a configuration with default transport settings.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        domain: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            email: email.into(),
            password: password.into(),
            base_url: base_url_for(domain)?,
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            stage_pause: DEFAULT_STAGE_PAUSE,
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// `domain_override` takes precedence over [`ENV_DOMAIN`].
    pub fn from_env(domain_override: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_lookup(domain_override, |name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary key-value lookup.
    pub fn from_lookup<F>(domain_override: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let email = required(ENV_EMAIL)?;
        let password = required(ENV_PASSWORD)?;

        let domain = domain_override
            .map(str::to_string)
            .or_else(|| lookup(ENV_DOMAIN))
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());

        Self::new(email.trim(), password, domain.trim())
    }

    /// Disables the pause between stages.
    pub fn without_stage_pause(mut self) -> Self {
        self.stage_pause = Duration::ZERO;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry backoff unit.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Joins a panel path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The base URL as a string, without trailing slash.
    pub fn origin(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// Host part of the base URL, for display.
    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Account identifier safe for logs: `abc***example.com`.
    pub fn masked_email(&self) -> String {
        mask_email(&self.email)
    }
}

impl std::fmt::Debug for CheckinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckinConfig")
            .field("email", &self.masked_email())
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("stage_pause", &self.stage_pause)
            .finish()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn base_url_for(domain: &str) -> Result<Url, ConfigError> {
    let raw = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };

    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
        domain: domain.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            domain: domain.to_string(),
            reason: "no host".to_string(),
        });
    }

    Ok(url)
}

fn mask_email(email: &str) -> String {
    let prefix: String = email.chars().take(3).collect();
    match email.split_once('@') {
        Some((_, domain)) => format!("{prefix}***{domain}"),
        None => format!("{prefix}***"),
    }
}

// ============================================================================
// Tests
// ============================================================================
