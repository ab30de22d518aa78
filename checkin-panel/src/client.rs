//! Panel client bundling configuration and transport.

use checkin_core::{AccountInfo, CheckinConfig, CheckinOutcome, SessionCredential};
use checkin_fetch::{RequestDescriptor, Transport};

use crate::error::PanelError;
use crate::{auth, checkin, info};

/// Talks to one panel for one run.
///
/// ```ignore
/// let client = PanelClient::new(CheckinConfig::from_env(None)?);
/// let credential = client.login().await?;
/// let outcome = client.checkin(&credential).await;
/// let info = client.account_info(&credential).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PanelClient {
    config: CheckinConfig,
    transport: Transport,
}

impl PanelClient {
    /// Creates a client; the transport backoff follows the configuration.
    pub fn new(config: CheckinConfig) -> Self {
        let transport = Transport::new().with_retry_base_delay(config.retry_base_delay);
        Self { config, transport }
    }

    /// The run configuration.
    pub fn config(&self) -> &CheckinConfig {
        &self.config
    }

    /// Logs in. See [`auth::login`].
    pub async fn login(&self) -> Result<SessionCredential, PanelError> {
        auth::login(&self.config, &self.transport).await
    }

    /// Submits today's check-in. See [`checkin::checkin`].
    pub async fn checkin(&self, credential: &SessionCredential) -> CheckinOutcome {
        checkin::checkin(&self.config, &self.transport, credential).await
    }

    /// Fetches account info. See [`info::fetch_account_info`].
    pub async fn account_info(
        &self,
        credential: &SessionCredential,
    ) -> Result<AccountInfo, PanelError> {
        info::fetch_account_info(&self.config, &self.transport, credential).await
    }
}

/// Applies the configured timeout and attempt budget.
pub(crate) fn configured(config: &CheckinConfig, request: RequestDescriptor) -> RequestDescriptor {
    request
        .timeout(config.timeout)
        .max_attempts(config.max_attempts)
}
