//! Retry strategies for HTTP requests.

use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::error::TransportError;

/// Strategy for retrying failed requests.
///
/// Delays grow linearly: the wait before attempt `n + 1` is `n * base_delay`,
/// and nothing is waited before the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Backoff unit.
    pub base_delay: Duration,
    /// Maximum delay between attempts.
    pub max_delay: Duration,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Calculates the delay before the attempt following `completed` attempts.
    pub fn delay_for_attempt(&self, completed: u32) -> Duration {
        self.base_delay.saturating_mul(completed).min(self.max_delay)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, TransportError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut completed = 0;

        loop {
            if completed > 0 {
                let delay = self.delay_for_attempt(completed);
                warn!(
                    attempt = completed + 1,
                    delay_secs = delay.as_secs_f32(),
                    "Retrying request"
                );
                tokio::time::sleep(delay).await;
            }

            completed += 1;
            match op(completed).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && completed < self.max_attempts => {
                    warn!(
                        error = %e,
                        attempt = completed,
                        max_attempts = self.max_attempts,
                        "Request attempt failed"
                    );
                }
                Err(e) => {
                    error!(
                        error = %e,
                        attempts = completed,
                        "Request failed, giving up"
                    );
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(2)
    }
}
