//! Retry configuration.

use std::time::Duration;

/// Default number of additional attempts after the first failure.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default first backoff wait.
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(2000);

/// Default ceiling for any wait, hinted or computed.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Configuration for retry behavior.
///
/// Only rate-limit failures are ever retried; everything else surfaces on
/// the first attempt. `max_retries` counts re-invocations, so the default of
/// 2 allows three attempts in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Wait before the first retry; each further retry doubles it.
    pub base_backoff: Duration,
    /// Ceiling applied to every wait, including provider-suggested delays.
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BASE_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl RetryConfig {
    /// Create a new default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max retries.
    #[must_use]
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the first backoff wait.
    #[must_use]
    pub fn base_backoff(mut self, base: Duration) -> Self {
        self.base_backoff = base;
        self
    }

    /// Set the wait ceiling.
    #[must_use]
    pub fn max_backoff(mut self, max: Duration) -> Self {
        self.max_backoff = max;
        self
    }

    /// Create a config that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new().max_retries(0)
    }

    /// Backoff wait for the given retry, counted from zero.
    ///
    /// Doubles per retry starting from `base_backoff` and saturates at
    /// `max_backoff`.
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}
