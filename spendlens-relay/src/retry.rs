//! Bounded retry on rate limiting

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error::{ModelError, RelayError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Fixed wait after a rate-limited attempt
    pub cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent on rate limits.
    ///
    /// `context` prefixes the message of a propagated model error.
    pub async fn run<T, F, Fut>(&self, context: &'static str, mut op: F) -> Result<T, RelayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ModelError>>,
    {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(attempt, max_attempts = attempts, "rate limit hit: {e}");
                    if attempt < attempts {
                        sleep(self.cooldown).await;
                    }
                }
                Err(source) => return Err(RelayError::Model { context, source }),
            }
        }

        Err(RelayError::RetriesExhausted { attempts })
    }
}
