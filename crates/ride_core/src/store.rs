//! Session store: holds the latest [RideState] snapshot and fans every replacement out to
//! subscribers.
//!
//! Each subscriber owns an unbounded channel, so a slow reader never holds up the writer and
//! never loses a snapshot. The current value and the subscriber list share one lock: a new
//! subscriber is seeded with the current snapshot under that lock, so it can neither miss the
//! next write nor see it twice.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::state::RideState;

#[derive(Debug)]
struct StoreInner {
    current: Arc<RideState>,
    subscribers: Vec<UnboundedSender<Arc<RideState>>>,
}

#[derive(Debug)]
pub struct RideSessionStore {
    inner: Mutex<StoreInner>,
}

impl Default for RideSessionStore {
    fn default() -> Self {
        Self::new(RideState::idle())
    }
}

impl RideSessionStore {
    pub fn new(initial: RideState) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                current: Arc::new(initial),
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Nothing panics while the lock is held, but a poisoned snapshot is still whole.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Latest snapshot.
    pub fn current(&self) -> Arc<RideState> {
        Arc::clone(&self.lock().current)
    }

    /// Stream that yields the current snapshot first, then every later one in write order.
    pub fn subscribe(&self) -> RideStateStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // The receiver is alive, so the send cannot fail.
        let _ = tx.send(Arc::clone(&inner.current));
        inner.subscribers.push(tx);
        RideStateStream { rx }
    }

    /// Swaps in `next` and delivers it to every live subscriber. Dropped streams are pruned.
    pub fn replace(&self, next: RideState) -> Arc<RideState> {
        let next = Arc::new(next);
        let mut inner = self.lock();
        inner.current = Arc::clone(&next);
        inner
            .subscribers
            .retain(|tx| tx.send(Arc::clone(&next)).is_ok());
        next
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }
}

/// Receiving end of [RideSessionStore::subscribe]. Never ends while the store is alive.
#[derive(Debug)]
pub struct RideStateStream {
    rx: UnboundedReceiver<Arc<RideState>>,
}

impl RideStateStream {
    /// Waits for the next snapshot. Returns `None` only once the store has been dropped.
    pub async fn next(&mut self) -> Option<Arc<RideState>> {
        self.rx.recv().await
    }

    /// Next already-delivered snapshot, without waiting.
    pub fn try_next(&mut self) -> Option<Arc<RideState>> {
        match self.rx.try_recv() {
            Ok(state) => Some(state),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every snapshot delivered so far, oldest first.
    pub fn drain(&mut self) -> Vec<Arc<RideState>> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
