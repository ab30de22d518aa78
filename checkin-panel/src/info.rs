//! Dashboard fetch.

use std::sync::LazyLock;

use checkin_core::{AccountInfo, CheckinConfig, SessionCredential};
use checkin_fetch::{RequestDescriptor, Transport};
use scraper::{Html, Selector};
use tracing::{info, instrument};

use crate::client::configured;
use crate::endpoints::DASHBOARD_PATH;
use crate::error::PanelError;
use crate::extract::extract;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Invalid selector"));

/// Fetches the dashboard and extracts account fields.
///
/// Fails only when the dashboard is unreachable or shows the login page;
/// an unrecognizable page yields a degraded [`AccountInfo`] instead.
#[instrument(skip_all, fields(host = config.host()))]
pub async fn fetch_account_info(
    config: &CheckinConfig,
    transport: &Transport,
    credential: &SessionCredential,
) -> Result<AccountInfo, PanelError> {
    info!("Fetching account dashboard");

    let request = configured(config, RequestDescriptor::get(config.endpoint(DASHBOARD_PATH)))
        .header("Cookie", credential.header_value());
    let html = transport.execute(&request).await?.decoded_text();

    if is_login_page(&html) {
        return Err(PanelError::SessionExpired);
    }

    let info = extract(&html);
    info!(
        fields = info.fields.len(),
        mode = ?info.mode,
        unwrapped = info.unwrapped,
        "Account info extracted"
    );
    Ok(info)
}

/// Returns true when the page title names the login page.
pub fn is_login_page(html: &str) -> bool {
    let document = Html::parse_document(html);
    document.select(&TITLE).next().is_some_and(|title| {
        let text = title.text().collect::<String>().to_lowercase();
        text.contains("login") || text.contains("登录")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_titles() {
        assert!(is_login_page("<html><head><title>Login | Panel</title></head></html>"));
        assert!(is_login_page("<title>用户登录</title>"));
        assert!(is_login_page("<title>  LOGIN </title>"));
    }

    #[test]
    fn test_dashboard_titles() {
        assert!(!is_login_page("<title>用户中心</title>"));
        assert!(!is_login_page("<html><body>no title</body></html>"));
    }
}
