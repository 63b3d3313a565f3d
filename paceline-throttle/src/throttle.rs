//! The throttle handle and its builder.

use crate::dispatch::{self, Entry, Shared};
use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

/// Default spacing between dispatch starts.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Cloneable handle to a single-flight dispatch lane.
///
/// All clones feed the same queue and the same dispatcher, so the guarantees
/// hold across every handle:
///
/// - at most one scheduled call runs at any instant,
/// - consecutive dispatch starts are at least [`min_interval`] apart,
/// - calls run in strict submission order,
/// - each caller receives exactly the output of its own call.
///
/// The gap is measured start to start. A call that runs longer than the
/// interval delays the next dispatch until it finishes; the spacing clock is
/// not restarted by completion.
///
/// The dispatcher runs until every handle is dropped and the queue is
/// drained. Work already accepted still runs during that drain, with its
/// output discarded if the submitter is gone.
///
/// [`min_interval`]: Throttle::min_interval
#[derive(Debug, Clone)]
pub struct Throttle {
    tx: mpsc::UnboundedSender<Entry>,
    shared: Arc<Shared>,
}

impl Throttle {
    /// Create a throttle and spawn its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::new(min_interval));
        tokio::spawn(dispatch::run(rx, Arc::clone(&shared)));
        Self { tx, shared }
    }

    /// Start building a throttle with custom settings.
    #[must_use]
    pub fn builder() -> ThrottleBuilder {
        ThrottleBuilder::new()
    }

    /// Queue a call and wait for its output.
    ///
    /// The future suspends until the call has been dispatched and has run to
    /// completion. The throttle never inspects the output, so `T` may be a
    /// `Result` and a failing call does not disturb the queue behind it.
    ///
    /// Submission is final: once accepted, the call runs at its slot even if
    /// this future is dropped before the output arrives.
    ///
    /// # Panics
    ///
    /// Panics if the dispatcher is gone, which only happens after a
    /// scheduled call panicked. The panicking call's own submitter and
    /// any calls queued behind it observe the same teardown. Failures
    /// are ordinary `Err` outputs and never tear the lane down.
    pub async fn schedule<F, Fut, T>(&self, work: F) -> T
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job = Box::pin(async move {
            let _ = done_tx.send(work().await);
        });
        let entry = Entry {
            seq: self.shared.next_seq.fetch_add(1, Ordering::Relaxed),
            enqueued_at: Instant::now(),
            job,
        };

        self.shared.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(entry).is_err() {
            self.shared.pending.fetch_sub(1, Ordering::SeqCst);
            panic!("throttle dispatcher stopped; a previously scheduled call panicked");
        }

        match done_rx.await {
            Ok(output) => output,
            Err(_) => panic!(
                "throttle dispatcher gone before this call completed; a scheduled call panicked"
            ),
        }
    }

    /// Spacing between consecutive dispatch starts.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.shared.min_interval
    }

    /// Number of calls accepted but not yet dispatched.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.pending.load(Ordering::SeqCst)
    }

    /// `true` while a call is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::SeqCst)
    }

    /// Start time of the most recent dispatch, if any happened yet.
    #[must_use]
    pub fn last_dispatch_at(&self) -> Option<Instant> {
        *self.shared.last_dispatch.lock()
    }
}

/// Builder for [`Throttle`].
#[derive(Debug, Clone)]
pub struct ThrottleBuilder {
    min_interval: Duration,
}

impl ThrottleBuilder {
    /// Create a builder with the default spacing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }

    /// Set the spacing between dispatch starts.
    ///
    /// `Duration::ZERO` disables spacing; calls still run one at a time.
    #[must_use]
    pub fn min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Build the throttle and spawn its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn build(self) -> Throttle {
        Throttle::new(self.min_interval)
    }
}

impl Default for ThrottleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
