//! Retrying HTTP transport.
//!
//! Every attempt builds its own client and drops it before returning, so no
//! pooled connection outlives the attempt that opened it. The client carries
//! a fixed set of desktop-browser headers; callers add request-specific ones
//! through the [`RequestDescriptor`].

use std::time::Duration;

use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderName, HeaderValue,
    USER_AGENT, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, redirect};
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::response::HttpResponse;
use crate::retry::RetryStrategy;

// ============================================================================
// Constants
// ============================================================================

/// Desktop Edge user agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36 Edg/138.0.0.0";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

const BROWSER_ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Idle connections kept per host by each per-attempt client.
const POOL_MAX_IDLE_PER_HOST: usize = 1;

// ============================================================================
// Transport
// ============================================================================

/// Executes [`RequestDescriptor`]s with retry and linear backoff.
#[derive(Debug, Clone)]
pub struct Transport {
    retry_base_delay: Duration,
}

impl Transport {
    /// Creates a transport with the default 2-second backoff unit.
    pub fn new() -> Self {
        Self {
            retry_base_delay: Duration::from_secs(2),
        }
    }

    /// Sets the backoff unit.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Executes a request, retrying transient failures.
    ///
    /// Any status code is a response; only transport failures are errors.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
        let strategy =
            RetryStrategy::new(request.max_attempts).with_base_delay(self.retry_base_delay);

        strategy.run(|attempt| attempt_once(request, attempt)).await
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Attempt
// ============================================================================

async fn attempt_once(
    request: &RequestDescriptor,
    attempt: u32,
) -> Result<HttpResponse, TransportError> {
    let classify = |e: reqwest::Error| TransportError::from_reqwest(&e, request.timeout);

    let client = build_client(request).map_err(classify)?;
    let headers = request_headers(&request.headers)?;

    debug!(attempt, "Sending request");

    let mut builder = client
        .request(request.method.clone(), &request.url)
        .headers(headers);
    if let Some(form) = &request.form {
        builder = builder.form(form);
    }

    let response = builder.send().await.map_err(classify)?;

    let status = response.status();
    let url = response.url().to_string();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(classify)?.to_vec();

    debug!(status = %status, bytes = body.len(), "Response received");

    drop(client);

    Ok(HttpResponse {
        status,
        headers,
        body,
        url,
    })
}

fn build_client(request: &RequestDescriptor) -> Result<Client, reqwest::Error> {
    let redirect_policy = if request.follow_redirects {
        redirect::Policy::default()
    } else {
        redirect::Policy::none()
    };

    let mut builder = Client::builder()
        .default_headers(browser_headers())
        .timeout(request.timeout)
        .danger_accept_invalid_certs(request.accept_invalid_certs)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .redirect(redirect_policy);

    if let Some(jar) = &request.cookie_jar {
        builder = builder.cookie_provider(jar.clone());
    }

    builder.build()
}

/// Fixed headers that make requests look like a desktop browser.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(BROWSER_ACCEPT_ENCODING));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

fn request_headers(pairs: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let invalid = |reason: String| TransportError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Edg/138"));
        assert_eq!(headers[ACCEPT_ENCODING], "gzip, deflate, br");
        assert_eq!(headers[CONNECTION], "keep-alive");
    }

    #[test]
    fn test_request_headers_rejects_newline() {
        let err = request_headers(&[("Cookie".to_string(), "a=1\nb=2".to_string())]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader { ref name, .. } if name == "Cookie"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_request_headers_accepts_xhr_marker() {
        let headers =
            request_headers(&[("X-Requested-With".to_string(), "XMLHttpRequest".to_string())])
                .unwrap();
        assert_eq!(headers["x-requested-with"], "XMLHttpRequest");
    }
}
