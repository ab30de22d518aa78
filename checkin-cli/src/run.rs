//! Stage sequencing: login, check-in, dashboard.

use std::time::Duration;

use anyhow::{Context, Result};
use checkin_core::{CheckinConfig, DEFAULT_DOMAIN, ENV_DOMAIN, ENV_EMAIL, ENV_PASSWORD};
use checkin_panel::PanelClient;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::Cli;
use crate::report::RunReport;

/// Runs all stages and returns the report.
///
/// Only configuration errors are returned as `Err`; stage failures are
/// recorded in the report.
pub async fn run(cli: &Cli) -> Result<RunReport> {
    let config = load_config(cli)?;
    let client = PanelClient::new(config);
    let config = client.config();

    info!(
        account = %config.masked_email(),
        host = config.host(),
        "Starting check-in"
    );

    let start = Instant::now();
    let mut report = RunReport::new(config.host(), config.masked_email());

    let credential = match client.login().await {
        Ok(credential) => credential,
        Err(e) => {
            error!(error = %e, "Login failed, stopping");
            report.login_error = Some(e.to_string());
            return Ok(report.finish(start.elapsed()));
        }
    };

    pause(config.stage_pause).await;
    report.checkin = Some(client.checkin(&credential).await);

    pause(config.stage_pause).await;
    match client.account_info(&credential).await {
        Ok(info) => {
            if info.is_degraded() {
                warn!(mode = ?info.mode, "Account info incomplete");
            }
            report.account_info = Some(info);
        }
        Err(e) => {
            error!(error = %e, "Could not read account info");
            report.info_error = Some(e.to_string());
        }
    }

    Ok(report.finish(start.elapsed()))
}

fn load_config(cli: &Cli) -> Result<CheckinConfig> {
    let config = CheckinConfig::from_env(cli.domain.as_deref())
        .inspect_err(|_| {
            error!(
                "Set {ENV_EMAIL} and {ENV_PASSWORD}; {ENV_DOMAIN} or --domain picks the panel host (default {DEFAULT_DOMAIN})"
            );
        })
        .context("Invalid configuration")?;

    Ok(if cli.no_pause {
        config.without_stage_pause()
    } else {
        config
    })
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
