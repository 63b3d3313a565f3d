//! # paceline-retries
//!
//! Bounded, classified retries for rate-limited upstreams.
//!
//! This crate re-invokes a failed operation only when the failure classifies
//! as a rate limit, waits the provider-suggested delay when the failure
//! carries one, and falls back to doubling backoff otherwise. Any other
//! failure surfaces immediately. Classification and hint extraction come
//! from `paceline-core`.
//!
//! ## Core Concepts
//!
//! - **[`RetryConfig`]**: Retry budget and backoff shape
//! - **[`with_retries`]**: Execute an operation under that budget
//!
//! ## Example
//!
//! ```
//! use paceline_retries::{with_retries, RetryConfig};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = RetryConfig::new()
//!     .max_retries(2)
//!     .base_backoff(Duration::from_millis(10));
//!
//! let result = with_retries(&config, || async {
//!     Ok::<_, String>("answer")
//! })
//! .await;
//!
//! assert_eq!(result, Ok("answer"));
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod executor;

// Re-exports
pub use config::{
    RetryConfig, DEFAULT_BASE_BACKOFF, DEFAULT_MAX_BACKOFF, DEFAULT_MAX_RETRIES,
};
pub use executor::with_retries;
