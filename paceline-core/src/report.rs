//! Structured summary of a classified failure.

use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;

use crate::classify::{classify, FailureClass};
use crate::hint::retry_delay_hint;

/// Snapshot of a failure after classification, suitable for logging or
/// returning to a caller alongside the original error.
///
/// Building a report never consumes or alters the failure itself: the
/// message is the rendered `Display` output and the delay hint is
/// re-extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Rendered failure message.
    pub message: String,
    /// How the failure classified.
    pub class: FailureClass,
    /// Provider-suggested retry delay in milliseconds, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
}

impl FailureReport {
    /// Build a report from any displayable failure.
    #[must_use]
    pub fn from_failure<E: Display>(failure: &E) -> Self {
        let message = failure.to_string();
        let class = classify(&message);
        let retry_delay_ms =
            retry_delay_hint(&message).map(|delay| delay.as_millis() as u64);
        Self {
            message,
            class,
            retry_delay_ms,
        }
    }

    /// `true` when the failure classified as rate limiting.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.class.is_rate_limited()
    }

    /// Provider-suggested retry delay as a [`Duration`], when present.
    #[must_use]
    pub fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay_ms.map(Duration::from_millis)
    }
}
