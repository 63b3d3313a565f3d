//! Retry executor for running operations against rate-limited upstreams.

use crate::config::RetryConfig;
use paceline_core::{classify, retry_delay_hint};
use std::fmt::Display;
use std::future::Future;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Execute an operation, retrying rate-limit failures.
///
/// Every failure is classified from its rendered message. A failure that is
/// not a rate limit surfaces immediately, unaltered and without waiting. A
/// rate-limit failure is retried up to `config.max_retries` more times; when
/// the budget runs out the last error surfaces unaltered.
///
/// The wait before each retry is the provider-suggested delay when the
/// message carries one, capped at `config.max_backoff`; otherwise the
/// exponential backoff from [`RetryConfig::backoff_for`].
///
/// # Example
///
/// ```
/// use paceline_retries::{with_retries, RetryConfig};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = RetryConfig::new().base_backoff(Duration::from_millis(10));
///
/// let result = with_retries(&config, || async {
///     Ok::<_, String>("fetched")
/// })
/// .await;
///
/// assert_eq!(result, Ok("fetched"));
/// # }
/// ```
pub async fn with_retries<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut retries: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let message = error.to_string();

                if !classify(&message).is_rate_limited() {
                    debug!(error = %message, "failure is not a rate limit, surfacing");
                    return Err(error);
                }
                if retries >= config.max_retries {
                    warn!(
                        retries,
                        max_retries = config.max_retries,
                        error = %message,
                        "rate limit retries exhausted"
                    );
                    return Err(error);
                }

                let wait = match retry_delay_hint(&message) {
                    Some(hint) => hint.min(config.max_backoff),
                    None => config.backoff_for(retries),
                };

                debug!(
                    attempt = retries + 1,
                    max_retries = config.max_retries,
                    wait_ms = wait.as_millis() as u64,
                    "rate limited, waiting before retry"
                );
                sleep(wait).await;
                retries += 1;
            }
        }
    }
}
