//! Login flow.
//!
//! The login page is fetched first for its anti-forgery token, then the
//! credentials are posted without following redirects. Both requests share
//! one cookie jar; the session credential is whatever the jar holds for the
//! panel afterwards.

use std::sync::{Arc, LazyLock};

use checkin_core::{CheckinConfig, SessionCredential};
use checkin_fetch::{Jar, RequestDescriptor, StatusCode, Transport, decode_json};
use reqwest::cookie::CookieStore;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

use crate::client::configured;
use crate::endpoints::{
    AUTHENTICATED_SEGMENT, CSRF_FIELD, EMAIL_FIELD, FORM_CONTENT_TYPE, LOGIN_PATH, PASSWORD_FIELD,
};
use crate::error::PanelError;
use crate::reply::PanelReply;

static CSRF_INPUT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"input[name="_token"]"#).expect("Invalid selector")
});

// ============================================================================
// Login
// ============================================================================

/// Logs in and returns the session credential.
#[instrument(skip_all, fields(account = %config.masked_email(), host = config.host()))]
pub async fn login(
    config: &CheckinConfig,
    transport: &Transport,
) -> Result<SessionCredential, PanelError> {
    let login_url = config.endpoint(LOGIN_PATH);
    let jar = Arc::new(Jar::default());

    info!("Fetching login page");
    let page = transport
        .execute(&configured(config, RequestDescriptor::get(&login_url)).cookie_jar(jar.clone()))
        .await?;

    if page.status != StatusCode::OK {
        return Err(PanelError::LoginPageUnavailable(page.status.as_u16()));
    }

    let mut form = vec![
        (EMAIL_FIELD, config.email.clone()),
        (PASSWORD_FIELD, config.password.clone()),
    ];
    if let Some(token) = extract_csrf_token(&page.decoded_text()) {
        debug!("Found anti-forgery token");
        form.push((CSRF_FIELD, token));
    }

    info!("Submitting credentials");
    let request = configured(config, RequestDescriptor::post(&login_url))
        .header("Origin", config.origin())
        .header("Referer", &login_url)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .form(form)
        .no_redirects()
        .cookie_jar(jar.clone());
    let response = transport.execute(&request).await?;

    debug!(
        status = %response.status,
        url = %response.url,
        content_type = response.content_type().unwrap_or("unknown"),
        "Login response received"
    );

    let credential = jar_credential(&jar, config);
    if let Some(credential) = &credential {
        debug!(cookies = ?credential.cookie_names(), "Session cookies collected");
    }

    let reply = match decode_json(&response) {
        Ok(value) => Some(PanelReply::from_value(&value)),
        Err(e) => {
            debug!(error = %e, "Login response is not JSON");
            None
        }
    };

    let signals = LoginSignals {
        status: response.status,
        location: response.location(),
        reply,
        cookie_count: credential.as_ref().map_or(0, SessionCredential::cookie_count),
    };

    match signals.verdict() {
        LoginVerdict::Rejected(reason) => Err(PanelError::AuthenticationFailed(reason)),
        verdict => {
            let credential = credential.ok_or_else(|| {
                PanelError::AuthenticationFailed("accepted but no session cookie was set".into())
            })?;
            if verdict == LoginVerdict::CookieHeuristic {
                warn!("Login assumed successful from session cookies alone");
            }
            info!(?verdict, "Logged in");
            Ok(credential)
        }
    }
}

/// Reads the anti-forgery token from the login form, if present.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&CSRF_INPUT)
        .next()?
        .value()
        .attr("value")
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn jar_credential(jar: &Jar, config: &CheckinConfig) -> Option<SessionCredential> {
    let header = jar.cookies(&config.base_url)?;
    SessionCredential::from_cookie_header(header.to_str().ok()?)
}

// ============================================================================
// Success Signals
// ============================================================================

/// What the login response showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSignals<'a> {
    /// Response status.
    pub status: StatusCode,
    /// `Location` header, if any.
    pub location: Option<&'a str>,
    /// Decoded reply, or `None` when no JSON object could be recovered.
    pub reply: Option<PanelReply>,
    /// Cookies held for the panel after the submission.
    pub cookie_count: usize,
}

/// Which rule decided the login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginVerdict {
    /// Redirected into the authenticated area.
    Redirected,
    /// JSON reply with `ret == 1`.
    Accepted,
    /// Body undecodable but cookies were set.
    CookieHeuristic,
    /// No success signal; carries the reason.
    Rejected(String),
}

impl LoginSignals<'_> {
    /// Applies the success rules in priority order.
    pub fn verdict(&self) -> LoginVerdict {
        if self.status != StatusCode::OK && self.status != StatusCode::FOUND {
            return LoginVerdict::Rejected(format!("unexpected status {}", self.status.as_u16()));
        }

        if self.status == StatusCode::FOUND
            && self
                .location
                .is_some_and(|l| l.contains(AUTHENTICATED_SEGMENT))
        {
            return LoginVerdict::Redirected;
        }

        match &self.reply {
            Some(reply) if reply.is_ok() => LoginVerdict::Accepted,
            Some(reply) => LoginVerdict::Rejected(reply.message_or("unknown error")),
            // Fragile: relies on the panel only setting cookies for a real
            // session. Tracking cookies set before login would pass here.
            None if self.cookie_count > 0 => LoginVerdict::CookieHeuristic,
            None => LoginVerdict::Rejected("no success signal and no session cookie".into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
