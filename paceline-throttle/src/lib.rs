//! # paceline-throttle
//!
//! Single-flight FIFO throttle with minimum spacing between dispatches.
//!
//! A [`Throttle`] guards a shared upstream: calls scheduled through it run
//! one at a time, in submission order, with consecutive starts at least
//! `min_interval` apart. Each caller suspends until its own call has run and
//! gets exactly that call's output back.
//!
//! Internally a single dispatcher task consumes a FIFO channel, so the
//! guarantees are structural: there is nobody else who could start a call.
//!
//! This crate knows nothing about retries or failure classification. A call
//! that fails returns its `Err` to the submitter and the queue moves on.
//!
//! ## Example
//!
//! ```
//! use paceline_throttle::Throttle;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let throttle = Throttle::new(Duration::from_millis(50));
//!
//! let first = throttle.schedule(|| async { "one" }).await;
//! let second = throttle.schedule(|| async { "two" }).await;
//!
//! assert_eq!((first, second), ("one", "two"));
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod dispatch;
pub mod throttle;

// Re-exports
pub use throttle::{Throttle, ThrottleBuilder, DEFAULT_MIN_INTERVAL};
