//! Shared résumé state owned by an editor session.
//!
//! One `watch` channel per session: the store keeps the sender, every mounted preview
//! keeps a receiver. Replacements are computed under the channel's lock, so a merge
//! always starts from the latest state and concurrent merges resolve last-write-wins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::ResumeData;

#[derive(Debug, Clone)]
pub struct ResumeStore {
    tx: Arc<watch::Sender<ResumeData>>,
}

impl ResumeStore {
    pub fn new(initial: ResumeData) -> Self {
        let (tx, _rx) = watch::channel(initial);
        ResumeStore { tx: Arc::new(tx) }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ResumeData {
        self.tx.borrow().clone()
    }

    /// Computes a complete replacement from the current state and stores it.
    ///
    /// Returns `true` if the state changed. An identical replacement is a no-op
    /// and does not notify subscribers.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResumeData) -> ResumeData,
    {
        let changed = self.tx.send_if_modified(|current| {
            let next = f(current);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        debug!(changed, subscribers = self.tx.receiver_count(), "resume state update");
        changed
    }

    /// New subscription. The receiver sees the current value as already seen.
    pub fn subscribe(&self) -> watch::Receiver<ResumeData> {
        self.tx.subscribe()
    }
}
