//! Fixed-cooldown retry for rate-limited provider calls.

use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::ProviderError;

/// How the resolver reacts to `ProviderError::RateLimited`.
///
/// The cooldown and the retry bound are both configurable; exhausting the
/// bound surfaces the final `RateLimited` to the caller, which degrades it
/// rather than failing.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub cooldown: Duration,
    /// Additional attempts after the first.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(62),
            max_retries: 10,
        }
    }
}

/// Retry an async operation as long as it keeps being rate limited.
///
/// Any other outcome, success or failure, is returned immediately. There is
/// no backoff growth and no jitter: one fixed cooldown per attempt.
pub async fn retry_on_rate_limit<F, Fut, T>(
    mut operation: F,
    policy: &RetryPolicy,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Err(ProviderError::RateLimited) if attempt < policy.max_retries => {
                attempt += 1;
                warn!(
                    "Rate limit exceeded (attempt {}/{}). Cooling down for {}s before retrying...",
                    attempt,
                    policy.max_retries,
                    policy.cooldown.as_secs()
                );
                sleep(policy.cooldown).await;
            }
            outcome => return outcome,
        }
    }
}
