//! Dispatch loop behind a throttle.
//!
//! All timing state is written by exactly one task: the dispatcher spawned
//! when the throttle is created. Handles only enqueue work and read counters.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::debug;

/// A queued unit of work.
pub(crate) struct Entry {
    /// Position in submission order, used for log correlation.
    pub(crate) seq: u64,
    /// When the entry was accepted.
    pub(crate) enqueued_at: Instant,
    /// The work itself. Delivers its output through a channel the submitter
    /// holds the other end of, so the dispatcher never sees results.
    pub(crate) job: BoxFuture<'static, ()>,
}

/// State shared between throttle handles and the dispatcher.
#[derive(Debug)]
pub(crate) struct Shared {
    /// Minimum gap between consecutive dispatch starts.
    pub(crate) min_interval: Duration,
    /// Entries accepted but not yet dispatched.
    pub(crate) pending: AtomicUsize,
    /// Whether a unit of work is currently running.
    pub(crate) busy: AtomicBool,
    /// Next sequence number to hand out.
    pub(crate) next_seq: AtomicU64,
    /// Start time of the most recent dispatch. Written only by the dispatcher.
    pub(crate) last_dispatch: Mutex<Option<Instant>>,
}

impl Shared {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            pending: AtomicUsize::new(0),
            busy: AtomicBool::new(false),
            next_seq: AtomicU64::new(0),
            last_dispatch: Mutex::new(None),
        }
    }
}

/// Run the dispatch loop until every handle is dropped and the queue drains.
///
/// One entry at a time: wait out the spacing gap, stamp the dispatch start,
/// run the job to completion, then look at the next entry. Single-flight and
/// spacing both follow from this shape rather than from lock discipline.
pub(crate) async fn run(mut rx: mpsc::UnboundedReceiver<Entry>, shared: Arc<Shared>) {
    while let Some(entry) = rx.recv().await {
        let last = *shared.last_dispatch.lock();
        if let Some(last) = last {
            let ready_at = last + shared.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep(ready_at - now).await;
            }
        }

        let started_at = Instant::now();
        *shared.last_dispatch.lock() = Some(started_at);
        shared.pending.fetch_sub(1, Ordering::SeqCst);
        shared.busy.store(true, Ordering::SeqCst);

        debug!(
            seq = entry.seq,
            waited_ms = started_at.duration_since(entry.enqueued_at).as_millis() as u64,
            pending = shared.pending.load(Ordering::SeqCst),
            "dispatching"
        );

        entry.job.await;
        shared.busy.store(false, Ordering::SeqCst);
    }

    debug!("throttle dispatcher stopped");
}
