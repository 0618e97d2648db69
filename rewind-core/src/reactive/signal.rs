//! Signal Implementation
//!
//! A Signal is the fundamental reactive primitive. It holds exactly one
//! current value and pushes every new value to its subscribers.
//!
//! # How Signals Work
//!
//! 1. `subscribe` registers an observer and immediately hands it the current
//!    value (replay-of-latest). A signal is a value holder, not an event
//!    stream: late subscribers never miss the state they start from.
//!
//! 2. `set` replaces the value and synchronously delivers it to every active
//!    subscriber, in subscription order, before returning.
//!
//! 3. Delivery iterates a snapshot of the registry taken with no lock held.
//!    Observers may call `set`, `subscribe`, or drop their subscriptions from
//!    inside a callback.
//!
//! 4. Deliveries never interleave. A `set` made while a delivery is running
//!    stores the value and queues it; the outermost `set` hands out queued
//!    values one at a time, in the order they were written. Every subscriber
//!    therefore sees the same sequence and ends on the current value.
//!    Nothing is coalesced.
//!
//! # Thread Safety
//!
//! Signals are `Send + Sync`. The value and the registry sit behind
//! `parking_lot` locks, and cloning a signal shares both. Delivery itself is
//! single-writer: concurrent `set` calls from different threads need external
//! ordering if observers must see a consistent sequence.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use super::subscriber::{SubscriberId, Subscription};

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// One registered observer.
struct Entry<T> {
    observer: Observer<T>,
    /// Cleared on unsubscribe so an in-flight delivery skips the observer.
    active: Arc<AtomicBool>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            observer: Arc::clone(&self.observer),
            active: Arc::clone(&self.active),
        }
    }
}

type Registry<T> = RwLock<IndexMap<SubscriberId, Entry<T>>>;

/// Values written but not yet delivered.
struct Delivery<T> {
    pending: VecDeque<T>,
    /// Set while some `set` call is draining `pending`.
    draining: bool,
}

/// Resets the queue if an observer panics mid-delivery, so the signal keeps
/// delivering afterwards.
struct DrainGuard<'a, T> {
    delivery: &'a Mutex<Delivery<T>>,
    armed: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut delivery = self.delivery.lock();
            delivery.draining = false;
            delivery.pending.clear();
        }
    }
}

/// A reactive cell holding a value of type T.
///
/// # Type Parameters
///
/// - `T`: The type of value stored in the signal. Must be Clone + Send + Sync.
///
/// # Example
///
/// ```rust
/// use rewind_core::reactive::Signal;
///
/// let count = Signal::new(0);
/// let _sub = count.subscribe(|v| println!("count = {v}"));
/// // prints "count = 0"
///
/// count.set(5);
/// // prints "count = 5"
/// assert_eq!(count.get(), 5);
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier for this signal.
    id: u64,

    /// The current value.
    value: Arc<RwLock<T>>,

    /// Observers in subscription order.
    subscribers: Arc<Registry<T>>,

    /// Queue that keeps nested writes in order.
    delivery: Arc<Mutex<Delivery<T>>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_signal_id(),
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(RwLock::new(IndexMap::new())),
            delivery: Arc::new(Mutex::new(Delivery {
                pending: VecDeque::new(),
                draining: false,
            })),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Replace the value and notify subscribers.
    ///
    /// Outside a delivery, every active subscriber has seen `value` by the
    /// time this returns. Called from inside an observer, the value becomes
    /// current at once and is delivered as soon as the running delivery ends.
    pub fn set(&self, value: T) {
        *self.value.write() = value.clone();

        {
            let mut delivery = self.delivery.lock();
            delivery.pending.push_back(value);
            if delivery.draining {
                tracing::trace!(signal = self.id, queued = delivery.pending.len(), "deferred nested set");
                return;
            }
            delivery.draining = true;
        }

        let mut guard = DrainGuard {
            delivery: &self.delivery,
            armed: true,
        };
        loop {
            let next = {
                let mut delivery = self.delivery.lock();
                let next = delivery.pending.pop_front();
                if next.is_none() {
                    delivery.draining = false;
                }
                next
            };
            match next {
                Some(value) => self.notify_subscribers(&value),
                None => break,
            }
        }
        guard.armed = false;
    }

    /// Update the value using a function.
    ///
    /// `f` runs with no lock held, so it may read this signal.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get();
        self.set(f(&current));
    }

    /// Register an observer.
    ///
    /// The observer receives the current value before this returns, then every
    /// later value until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        let entry = Entry {
            observer: Arc::new(observer),
            active: Arc::new(AtomicBool::new(true)),
        };
        let replay = Arc::clone(&entry.observer);

        self.subscribers.write().insert(id, entry);
        tracing::debug!(signal = self.id, subscriber = %id, "subscribed");

        let current = self.get();
        replay(&current);

        let registry = Arc::downgrade(&self.subscribers);
        let signal_id = self.id;
        Subscription::new(id, move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            let removed = registry.write().shift_remove(&id);
            if let Some(entry) = removed {
                entry.active.store(false, Ordering::SeqCst);
                tracing::debug!(signal = signal_id, subscriber = %id, "unsubscribed");
            }
        })
    }

    /// Deliver `value` to a snapshot of the current subscribers.
    fn notify_subscribers(&self, value: &T) {
        let snapshot: SmallVec<[Entry<T>; 4]> =
            self.subscribers.read().values().cloned().collect();

        tracing::trace!(signal = self.id, subscribers = snapshot.len(), "notifying");

        for entry in snapshot {
            if entry.active.load(Ordering::SeqCst) {
                (entry.observer)(value);
            }
        }
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
            delivery: Arc::clone(&self.delivery),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &*self.value.read())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
