use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Decrement-to-zero rendezvous between the dispatcher and the workers.
///
/// The dispatcher calls [`PhaseBarrier::add`] before enqueuing a phase and
/// [`PhaseBarrier::wait`] after it; each worker calls
/// [`PhaseBarrier::complete`] once per request job, as soon as the round trip
/// has finished.
#[derive(Debug, Default)]
pub struct PhaseBarrier {
    pending: AtomicUsize,
    released: Notify,
}

impl PhaseBarrier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, count: usize) {
        self.pending.fetch_add(count, Ordering::AcqRel);
    }

    pub fn complete(&self) {
        let previous = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |pending| {
                pending.checked_sub(1)
            });
        match previous {
            Ok(1) => self.released.notify_one(),
            Ok(_) => {}
            Err(_exhausted) => tracing::warn!("Phase barrier completed more times than it was armed."),
        }
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Suspends until every armed job has completed.
    pub async fn wait(&self) {
        // A permit left over from an earlier phase only causes one extra
        // check of the counter.
        while self.pending() > 0 {
            self.released.notified().await;
        }
    }
}
