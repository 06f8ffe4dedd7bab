//! Shutdown coordination.
//!
//! One `Shutdown` is created at startup and cloned into the signal task.
//! The HTTP server and the connection campaign each hold a receiver; a
//! receiver also wakes when every `Shutdown` clone has been dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

#[derive(Clone)]
pub struct Shutdown {
    notify: broadcast::Sender<()>,
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            notify,
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Wake every receiver. Only the first call notifies; later calls are
    /// no-ops.
    pub fn trigger(&self) {
        if self.requested.swap(true, Ordering::AcqRel) {
            return;
        }
        let listeners = self.notify.send(()).unwrap_or(0);
        tracing::debug!(listeners, "Shutdown triggered");
    }

    /// Whether `trigger` has been called on any clone.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub fn receiver_count(&self) -> usize {
        self.notify.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
