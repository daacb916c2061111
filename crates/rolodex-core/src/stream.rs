// ── Cache subscriptions ──
//
// Read side of an `EntityCollection`: the snapshot seen last plus a
// receiver that wakes on every mutation of the owning cache.

use std::sync::Arc;

use tokio::sync::watch;

/// Ordered snapshot shared by a collection and its subscribers.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A subscription to one controller's cache.
pub struct EntityStream<T> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = Arc::clone(&receiver.borrow());
        Self { current, receiver }
    }

    /// Snapshot as of subscription or the last [`changed`](Self::changed).
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Wait for the next mutation and return the new snapshot.
    ///
    /// `None` once the controller owning the cache is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        self.current = Arc::clone(&self.receiver.borrow_and_update());
        Some(Arc::clone(&self.current))
    }
}
