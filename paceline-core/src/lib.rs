//! # paceline-core
//!
//! Failure classification and retry-delay hints for paceline.
//!
//! Upstream failures arrive here as rendered messages. This crate decides
//! what kind of failure a message describes and whether the provider told
//! us how long to wait, without ever touching transports or timers.
//!
//! ## Core Concepts
//!
//! - **[`classify`]**: Decide whether a failure message is a rate limit
//! - **[`FailureClass`]**: The outcome of classification
//! - **[`retry_delay_hint`]**: Extract a `google.rpc.RetryInfo` delay
//! - **[`FailureReport`]**: Serializable snapshot of a classified failure
//!
//! ## Example
//!
//! ```
//! use paceline_core::{classify, retry_delay_hint, FailureClass};
//! use std::time::Duration;
//!
//! let message = r#"{"error":{"status":"RESOURCE_EXHAUSTED","details":[
//!     {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"1.5s"}
//! ]}}"#;
//!
//! assert_eq!(classify(message), FailureClass::RateLimited);
//! assert_eq!(retry_delay_hint(message), Some(Duration::from_millis(1500)));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod classify;
pub mod hint;
pub mod report;

// Re-exports
pub use classify::{classify, FailureClass};
pub use hint::retry_delay_hint;
pub use report::FailureReport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_and_hint_agree_on_rate_limit_body() {
        let message = r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED","details":[
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"3s"}
        ]}}"#;

        assert_eq!(classify(message), FailureClass::RateLimited);
        assert!(retry_delay_hint(message).is_some());
    }

    #[test]
    fn test_hint_without_rate_limit_marker_is_still_extracted() {
        // Classification and hint extraction are independent reads of the
        // same message.
        let message = r#"{"error":{"details":[
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"2s"}
        ]}}"#;

        assert_eq!(classify(message), FailureClass::Other);
        assert!(retry_delay_hint(message).is_some());
    }

    #[test]
    fn test_report_combines_both_reads() {
        let report = FailureReport::from_failure(&"quota exhausted for project");
        assert!(report.is_rate_limited());
        assert_eq!(report.retry_delay(), None);
    }
}
