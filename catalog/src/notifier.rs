//! Level-triggered change notification.
//!
//! Each provider owns one [`ChangeNotifier`]. Listeners hold a
//! [`ChangeSubscription`] and learn only that something changed since they
//! last looked, never how many times.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::debug;

/// Publishing side of a provider's change channel.
#[derive(Debug)]
pub struct ChangeNotifier {
    source: Arc<str>,
    tx: watch::Sender<u64>,
    closed: AtomicBool,
}

impl ChangeNotifier {
    /// Create a notifier for the provider named `source`.
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            source: source.into(),
            tx,
            closed: AtomicBool::new(false),
        }
    }

    /// Register a listener.
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            source: Arc::clone(&self.source),
            rx: self.tx.subscribe(),
        }
    }

    /// Mark the provider changed. Returns false once closed.
    pub fn notify(&self) -> bool {
        // The closed check runs under the channel's write lock, as does close.
        let sent = self.tx.send_if_modified(|generation| {
            if self.closed.load(Ordering::Acquire) {
                return false;
            }
            *generation = generation.wrapping_add(1);
            true
        });
        if sent {
            debug!("{} changed", self.source);
        }
        sent
    }

    /// Stop delivering notifications.
    ///
    /// Once this returns, no further [`ChangeNotifier::notify`] reaches a
    /// subscriber.
    pub fn close(&self) {
        self.tx.send_if_modified(|_| {
            self.closed.store(true, Ordering::Release);
            false
        });
    }

    /// Whether [`ChangeNotifier::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of notifications sent so far.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Receiving side of a provider's change channel.
#[derive(Debug, Clone)]
pub struct ChangeSubscription {
    source: Arc<str>,
    rx: watch::Receiver<u64>,
}

impl ChangeSubscription {
    /// Name of the provider this subscription listens to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the provider changed since the last acknowledgement.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Mark all changes so far as seen.
    pub fn acknowledge(&mut self) {
        self.rx.borrow_and_update();
    }

    /// Wait for the next change. Returns false when the provider is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
