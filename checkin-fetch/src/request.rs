//! HTTP request descriptors.
//!
//! A descriptor is plain data: the transport turns it into a fresh client
//! and request on every attempt.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::cookie::Jar;

/// Per-attempt timeout used when the caller does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Total attempts used when the caller does not set a count.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Everything needed to execute one logical request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Extra headers, applied over the fixed browser headers.
    pub headers: Vec<(String, String)>,
    /// Form-encoded body.
    pub form: Option<Vec<(String, String)>>,
    /// Time bound for each attempt.
    pub timeout: Duration,
    /// Whether to skip TLS certificate validation.
    pub accept_invalid_certs: bool,
    /// Total attempts.
    pub max_attempts: u32,
    /// Whether 3xx responses are followed.
    pub follow_redirects: bool,
    /// Jar shared across requests, when cookies must carry over.
    pub cookie_jar: Option<Arc<Jar>>,
}

impl RequestDescriptor {
    /// Creates a descriptor with default settings.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            form: None,
            timeout: DEFAULT_TIMEOUT,
            // Panel certificates are known to be non-standard; validation is
            // off as an accepted trust trade-off for this one host.
            accept_invalid_certs: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            follow_redirects: true,
            cookie_jar: None,
        }
    }

    /// Creates a GET descriptor.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST descriptor.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a form-encoded body.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt budget.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Stops at the first response instead of following redirects.
    pub fn no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Shares a cookie jar with other requests.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }
}
