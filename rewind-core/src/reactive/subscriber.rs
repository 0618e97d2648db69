//! Subscriber types for the reactive system.
//!
//! Every observer registered on a [`Signal`](super::Signal) gets a
//! [`SubscriberId`] and is handed back a [`Subscription`]. The subscription is
//! the only way to stop receiving values: call [`Subscription::unsubscribe`]
//! or simply drop it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a subscriber.
///
/// Each observer gets a unique ID when it subscribes. The ID keys the
/// subscriber in its signal's registry and identifies it in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Handle to a live subscription.
///
/// Dropping this handle removes the observer from its signal. The handle is
/// not generic over the signal's value type, so subscriptions to different
/// signals can be stored together.
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
pub struct Subscription {
    id: SubscriberId,
    /// Removes the observer from its signal. `None` once it has run.
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new<F>(id: SubscriberId, cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Get the subscriber's unique ID.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Stop receiving values.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// Keep the observer registered for as long as the signal lives.
    ///
    /// The subscription can no longer be cancelled afterwards.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
