//! Scroll observers and the registry that notifies them.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::warn;

/// Observer of scroll progress.
pub trait ScrollListener: Send + Sync {
    /// A full traversal finished; `count` is the number of loops completed so far.
    fn on_loop_completion(&self, count: u32);

    /// Scrolling stopped because the loop limit or the duration was reached.
    fn on_finished(&self);
}

/// Notifications as values, for hosts that prefer a channel over callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    LoopCompleted { count: u32 },
    Finished,
}

/// Listener that forwards notifications over an unbounded channel
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<ScrollEvent>,
}

impl ChannelListener {
    pub fn new(tx: mpsc::UnboundedSender<ScrollEvent>) -> Self {
        Self { tx }
    }

    /// Create a listener together with the receiving end of its channel
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<ScrollEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self::new(tx)), rx)
    }

    fn send_event(&self, event: ScrollEvent) {
        if self.tx.send(event).is_err() {
            warn!("Failed to send scroll event: receiver dropped");
        }
    }
}

impl ScrollListener for ChannelListener {
    fn on_loop_completion(&self, count: u32) {
        self.send_event(ScrollEvent::LoopCompleted { count });
    }

    fn on_finished(&self) {
        self.send_event(ScrollEvent::Finished);
    }
}

/// De-duplicated set of listeners behind a single lock.
///
/// Identity is the `Arc` allocation, so registering the same `Arc` twice is a
/// no-op. Notification runs over a snapshot, which lets a listener add or
/// remove listeners from inside its callback.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn ScrollListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn ScrollListener>>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns false if the listener was already registered
    pub fn add(&self, listener: Arc<dyn ScrollListener>) -> bool {
        let mut listeners = self.lock();
        if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Returns false if the listener wasn't registered
    pub fn remove(&self, listener: &Arc<dyn ScrollListener>) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<dyn ScrollListener>> {
        self.lock().clone()
    }

    pub fn notify_loop_completion(&self, count: u32) {
        for listener in self.snapshot() {
            listener.on_loop_completion(count);
        }
    }

    pub fn notify_finished(&self) {
        for listener in self.snapshot() {
            listener.on_finished();
        }
    }
}
