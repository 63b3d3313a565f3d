//! Guarded calls to a simulated rate-limited upstream.
//!
//! The upstream rejects its first call with a `RetryInfo` delay hint and its
//! second with a bare 429; the lane waits the hinted delay, then backs off,
//! and the third attempt succeeds. A non-rate-limit failure surfaces
//! immediately.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --example guarded_calls
//! ```

use paceline::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debugging
    tracing_subscriber::fmt::init();

    println!("🚦 Guarded Calls Example\n");

    let lane = Lane::new(
        LaneConfig::new()
            .min_interval_ms(300)
            .max_retries(2)
            .base_backoff_ms(200),
    )?;

    // An upstream that rate-limits its first two calls.
    let hits = Arc::new(AtomicU32::new(0));

    let started = Instant::now();
    let hits_for_call = Arc::clone(&hits);
    let answer: Result<String, String> = lane
        .call(move || {
            let hits = Arc::clone(&hits_for_call);
            async move { flaky_upstream(&hits).await }
        })
        .await;

    match answer {
        Ok(body) => println!(
            "Recovered after {} calls in {:?}: {}",
            hits.load(Ordering::SeqCst),
            started.elapsed(),
            body
        ),
        Err(error) => println!("Gave up: {}", error),
    }

    // A failure that is not a rate limit is never retried.
    let denied: Result<String, String> = lane
        .call(|| async { Err("401 Unauthorized".to_string()) })
        .await;

    if let Err(error) = denied {
        let report = FailureReport::from_failure(&error);
        println!("\nNot retried ({:?}):", report.class);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Pretend upstream: two rate-limit rejections, then success.
async fn flaky_upstream(hits: &AtomicU32) -> Result<String, String> {
    match hits.fetch_add(1, Ordering::SeqCst) {
        0 => Err(concat!(
            r#"{"error":{"status":"RESOURCE_EXHAUSTED","details":["#,
            r#"{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"0.4s"}"#,
            r#"]}}"#
        )
        .to_string()),
        1 => Err("429 Too Many Requests".to_string()),
        _ => Ok("the answer is 42".to_string()),
    }
}
