//! The lane: one throttle, one retry policy, composed at the call site.

use crate::config::{ConfigError, LaneConfig};
use paceline_retries::{with_retries, RetryConfig};
use paceline_throttle::Throttle;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// A guarded path to one rate-limited upstream.
///
/// Every [`call`] is queued on the lane's shared [`Throttle`] and wrapped in
/// its retry policy. Because each retry attempt is scheduled like any other
/// call, an attempt joins the back of the queue and respects the spacing gap
/// with respect to whatever else went through the lane in the meantime.
///
/// Clone the lane (or the handle from [`throttle`]) freely; all clones feed
/// the same queue.
///
/// [`call`]: Lane::call
/// [`throttle`]: Lane::throttle
#[derive(Debug, Clone)]
pub struct Lane {
    throttle: Throttle,
    retry: RetryConfig,
}

impl Lane {
    /// Build a lane from a validated config and spawn its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: LaneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            min_interval_ms = config.min_interval_ms,
            max_retries = config.max_retries,
            base_backoff_ms = config.base_backoff_ms,
            max_backoff_ms = config.max_backoff_ms,
            "lane created"
        );
        Ok(Self {
            throttle: Throttle::new(config.min_interval()),
            retry: RetryConfig::new()
                .max_retries(config.max_retries)
                .base_backoff(config.base_backoff())
                .max_backoff(config.max_backoff()),
        })
    }

    /// Build a lane from environment variables with the given prefix.
    ///
    /// See [`LaneConfig::from_env`] for the variable names.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        Self::new(LaneConfig::from_env(prefix)?)
    }

    /// Run a call through the lane.
    ///
    /// The operation must be re-invocable: it is called once per attempt.
    /// Rate-limit failures are retried per the lane's [`RetryConfig`]; any
    /// other failure, or exhaustion of the budget, surfaces the error
    /// unaltered.
    pub async fn call<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let operation = Arc::new(operation);
        let throttle = self.throttle.clone();

        with_retries(&self.retry, move || {
            let operation = Arc::clone(&operation);
            let throttle = throttle.clone();
            async move { throttle.schedule(move || operation()).await }
        })
        .await
    }

    /// The lane's shared throttle handle.
    #[must_use]
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// The lane's retry policy.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}
