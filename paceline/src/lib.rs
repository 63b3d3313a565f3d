//! # paceline - Guarded Calls to Rate-Limited Upstreams
//!
//! paceline serializes calls to a shared upstream and retries the failures
//! that deserve it. One [`Lane`] per upstream gives you:
//!
//! - **Single-flight dispatch**: no two calls run at the same time
//! - **Spacing**: consecutive call starts at least `min_interval_ms` apart
//! - **Strict FIFO**: calls run in submission order, across all clones
//! - **Classified retries**: only rate-limit failures are retried, up to
//!   `max_retries` extra attempts
//! - **Hint-aware waits**: a provider-supplied `google.rpc.RetryInfo` delay
//!   is honored; otherwise backoff doubles from `base_backoff_ms`
//!
//! ## Quick Start
//!
//! ```
//! use paceline::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ConfigError> {
//! let lane = Lane::new(LaneConfig::new().min_interval_ms(10))?;
//!
//! let answer: Result<&str, String> = lane.call(|| async {
//!     // Talk to the upstream here.
//!     Ok("pong")
//! })
//! .await;
//!
//! assert_eq!(answer, Ok("pong"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! paceline is organized as a workspace of focused crates:
//!
//! - [`paceline_core`] - Failure classification and retry-delay hints
//! - [`paceline_throttle`] - Single-flight FIFO throttle
//! - [`paceline_retries`] - Bounded, classified retries
//!
//! The throttle knows nothing about retries and the retry executor knows
//! nothing about queues; the [`Lane`] composes them, routing every retry
//! attempt back through the shared throttle.
//!
//! ## Configuration
//!
//! [`LaneConfig`] round-trips through serde and can be loaded from the
//! environment:
//!
//! ```no_run
//! use paceline::{Lane, ConfigError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ConfigError> {
//! // Reads UPSTREAM_MIN_INTERVAL_MS, UPSTREAM_MAX_RETRIES,
//! // UPSTREAM_BASE_BACKOFF_MS and UPSTREAM_MAX_BACKOFF_MS.
//! let lane = Lane::from_env("UPSTREAM")?;
//! # let _ = lane;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// ============================================================================
// Lane Composition
// ============================================================================

pub mod config;
pub mod lane;

// ============================================================================
// Core Crate Re-exports
// ============================================================================

/// Failure classification and retry-delay hints.
pub use paceline_core as core;

/// Bounded, classified retries.
pub use paceline_retries as retries;

/// Single-flight FIFO throttle.
pub use paceline_throttle as throttle;

// ============================================================================
// Core Type Re-exports (Flat)
// ============================================================================

// Lane
pub use config::{ConfigError, LaneConfig};
pub use lane::Lane;

// Classification
pub use paceline_core::{classify, retry_delay_hint, FailureClass, FailureReport};

// Retries
pub use paceline_retries::{with_retries, RetryConfig};

// Throttle
pub use paceline_throttle::{Throttle, ThrottleBuilder};

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient prelude for common imports.
///
/// Import everything you need with a single use statement:
///
/// ```
/// use paceline::prelude::*;
/// ```
pub mod prelude {
    // Lane
    pub use crate::config::{ConfigError, LaneConfig};
    pub use crate::lane::Lane;

    // Classification
    pub use crate::{classify, retry_delay_hint, FailureClass, FailureReport};

    // Retries
    pub use crate::{with_retries, RetryConfig};

    // Throttle
    pub use crate::{Throttle, ThrottleBuilder};
}

// ============================================================================
// Version Information
// ============================================================================

/// Returns the current version of paceline.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns version information as a tuple (major, minor, patch).
pub fn version_tuple() -> (u32, u32, u32) {
    let version = version();
    let parts: Vec<&str> = version.split('.').collect();
    (
        parts.first().and_then(|s| s.parse().ok()).unwrap_or(0),
        parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0),
        parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }

    #[test]
    fn test_version_tuple() {
        let (major, minor, patch) = version_tuple();
        assert_eq!(major, 0);
        assert_eq!(minor, 1);
        assert_eq!(patch, 0);
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let config = LaneConfig::new().max_retries(4);
        assert_eq!(config.max_retries, 4);
        assert_eq!(classify("quota"), FailureClass::RateLimited);
    }
}
