//! Lane configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building or validating a [`LaneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set but did not parse.
    #[error("invalid value for {name}: {value:?}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        name: String,
        /// The raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The backoff ceiling is below the first backoff wait.
    #[error("max_backoff_ms ({max_backoff_ms}) must be at least base_backoff_ms ({base_backoff_ms})")]
    BackoffRange {
        /// Configured first backoff wait.
        base_backoff_ms: u64,
        /// Configured ceiling.
        max_backoff_ms: u64,
    },
}

/// Configuration for a [`Lane`](crate::Lane).
///
/// Durations are plain milliseconds so the struct round-trips through config
/// files and environment variables without custom parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Minimum gap between call starts.
    pub min_interval_ms: u64,
    /// Retries allowed after the first rate-limit failure.
    pub max_retries: u32,
    /// Wait before the first retry; doubles per retry.
    pub base_backoff_ms: u64,
    /// Ceiling for any retry wait, hinted or computed.
    pub max_backoff_ms: u64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 2000,
            max_retries: 2,
            base_backoff_ms: 2000,
            max_backoff_ms: 60_000,
        }
    }
}

impl LaneConfig {
    /// Create a new default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between call starts.
    #[must_use]
    pub fn min_interval_ms(mut self, ms: u64) -> Self {
        self.min_interval_ms = ms;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the first backoff wait.
    #[must_use]
    pub fn base_backoff_ms(mut self, ms: u64) -> Self {
        self.base_backoff_ms = ms;
        self
    }

    /// Set the retry wait ceiling.
    #[must_use]
    pub fn max_backoff_ms(mut self, ms: u64) -> Self {
        self.max_backoff_ms = ms;
        self
    }

    /// Load from environment variables with the given prefix.
    ///
    /// Looks for:
    /// - `{PREFIX}_MIN_INTERVAL_MS`
    /// - `{PREFIX}_MAX_RETRIES`
    /// - `{PREFIX}_BASE_BACKOFF_MS`
    /// - `{PREFIX}_MAX_BACKOFF_MS`
    ///
    /// Unset variables keep their defaults. A variable that is set but does
    /// not parse is an error, not a silent fallback.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = read_var(&format!("{}_MIN_INTERVAL_MS", prefix))? {
            config.min_interval_ms = ms;
        }
        if let Some(n) = read_var(&format!("{}_MAX_RETRIES", prefix))? {
            config.max_retries = n;
        }
        if let Some(ms) = read_var(&format!("{}_BASE_BACKOFF_MS", prefix))? {
            config.base_backoff_ms = ms;
        }
        if let Some(ms) = read_var(&format!("{}_MAX_BACKOFF_MS", prefix))? {
            config.max_backoff_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_backoff_ms < self.base_backoff_ms {
            return Err(ConfigError::BackoffRange {
                base_backoff_ms: self.base_backoff_ms,
                max_backoff_ms: self.max_backoff_ms,
            });
        }
        Ok(())
    }

    /// Gap between call starts as a [`Duration`].
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// First backoff wait as a [`Duration`].
    #[must_use]
    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    /// Retry wait ceiling as a [`Duration`].
    #[must_use]
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

fn read_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name).ok() {
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw,
                reason: err.to_string(),
            }),
        },
        None => Ok(None),
    }
}
