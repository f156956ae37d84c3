//! In-flight request bookkeeping.
//!
//! A [`RequestTracker`] owns the set of pending requests. Each call to
//! [`RequestTracker::begin`] adds an entry and hands back a [`RequestGuard`]
//! that removes it again. Observers follow the aggregated loading flag
//! through [`RequestTracker::subscribe`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Tracing target for request tracking.
pub const TRACING_TARGET: &str = "couple_planner::requests";

struct TrackerInner {
    next_id: AtomicU64,
    pending: watch::Sender<BTreeMap<u64, String>>,
    loading: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct RequestTracker {
    inner: Arc<TrackerInner>,
}

impl std::fmt::Debug for RequestTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestTracker")
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl RequestTracker {
    pub fn new() -> Self {
        let inner = TrackerInner {
            next_id: AtomicU64::new(0),
            pending: watch::Sender::new(BTreeMap::new()),
            loading: watch::Sender::new(false),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Register a request; it stays pending until the guard is dropped or
    /// finished.
    pub fn begin(&self, label: impl Into<String>) -> RequestGuard {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let label = label.into();

        tracing::trace!(target: TRACING_TARGET, id, label = %label, "Request started");
        self.update(|pending| {
            pending.insert(id, label);
        });

        RequestGuard {
            tracker: self.clone(),
            id,
            finished: false,
        }
    }

    fn finish(&self, id: u64) {
        tracing::trace!(target: TRACING_TARGET, id, "Request finished");
        self.update(|pending| {
            pending.remove(&id);
        });
    }

    // loading is recomputed while the pending map is still locked so
    // concurrent updates cannot publish a stale flag
    fn update(&self, change: impl FnOnce(&mut BTreeMap<u64, String>)) {
        let loading = &self.inner.loading;
        self.inner.pending.send_modify(|pending| {
            change(pending);
            let busy = !pending.is_empty();
            loading.send_if_modified(|current| {
                let changed = *current != busy;
                *current = busy;
                changed
            });
        });
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.loading.borrow()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Labels of the requests still in flight, oldest first
    pub fn pending(&self) -> Vec<String> {
        self.inner.pending.borrow().values().cloned().collect()
    }

    /// Observe the loading flag; it flips to `true` when the first request
    /// starts and back to `false` when the last one ends.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.loading.subscribe()
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a request registered for as long as it lives.
#[must_use = "dropping the guard ends the request immediately"]
pub struct RequestGuard {
    tracker: RequestTracker,
    id: u64,
    finished: bool,
}

impl RequestGuard {
    pub fn finish(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.finished {
            self.finished = true;
            self.tracker.finish(self.id);
        }
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.release();
    }
}
