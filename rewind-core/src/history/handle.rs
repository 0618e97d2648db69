//! History Handle
//!
//! [`History`] pairs a [`HistoryEngine`] with a [`Signal`] that always holds
//! the engine's current snapshot. Every operation mutates the engine under
//! its lock, releases the lock, and only then pushes the new current value
//! to the signal. Observers can therefore call back into the same history
//! from inside a notification.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use super::engine::HistoryEngine;
use super::limit::HistoryLimit;
use crate::config::HistoryConfig;
use crate::reactive::{Signal, Subscription};

/// A reactive value with bounded, linear undo/redo history.
///
/// Cloning a `History` shares the same snapshots and subscribers.
///
/// # Example
///
/// ```rust
/// use rewind_core::history;
///
/// let nav = history("homepage", 0);
/// nav.set("about");
/// nav.set("clients");
///
/// nav.undo();
/// assert_eq!(nav.get(), "about");
///
/// nav.redo();
/// assert_eq!(nav.get(), "clients");
/// assert_eq!(nav.previous_values(None), ["homepage", "about"]);
/// ```
pub struct History<T>
where
    T: Clone + Send + Sync + 'static,
{
    engine: Arc<Mutex<HistoryEngine<T>>>,
    signal: Signal<T>,
}

/// Create a [`History`] seeded with `seed`.
///
/// `limit` accepts anything convertible to [`HistoryLimit`]; counts below 1
/// mean unbounded.
pub fn history<T>(seed: T, limit: impl Into<HistoryLimit>) -> History<T>
where
    T: Clone + Send + Sync + 'static,
{
    History::with_limit(seed, limit)
}

impl<T> History<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an unbounded history holding only `seed`.
    pub fn new(seed: T) -> Self {
        Self::with_limit(seed, HistoryLimit::Unbounded)
    }

    /// Create a history holding only `seed`, retaining at most `limit`
    /// snapshots.
    pub fn with_limit(seed: T, limit: impl Into<HistoryLimit>) -> Self {
        let limit = limit.into();
        tracing::debug!(%limit, "creating history");
        Self {
            signal: Signal::new(seed.clone()),
            engine: Arc::new(Mutex::new(HistoryEngine::with_limit(seed, limit))),
        }
    }

    /// Create a history using the settings in `config`.
    pub fn from_config(seed: T, config: &HistoryConfig) -> Self {
        Self::with_limit(seed, config.history_limit)
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.engine.lock().current().clone()
    }

    /// Record `value` as the new current value and notify subscribers.
    ///
    /// Any snapshots newer than the current one are discarded first, so redo
    /// is no longer possible afterwards. Returns the current value once
    /// delivery has finished, which differs from `value` if an observer
    /// wrote to this history in response.
    pub fn set(&self, value: T) -> T {
        let current = {
            let mut engine = self.engine.lock();
            let evicted = engine.push(value);
            tracing::trace!(
                index = engine.current_index(),
                len = engine.len(),
                evicted,
                "set"
            );
            engine.current().clone()
        };
        self.signal.set(current);
        self.get()
    }

    /// Record `f(current)` as the new current value.
    ///
    /// `f` runs before the history is touched; if it panics nothing changes.
    pub fn update<F>(&self, f: F) -> T
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.get());
        self.set(next)
    }

    /// Like [`update`](Self::update), but when `f` returns an error the
    /// history is left untouched and nobody is notified.
    pub fn try_update<F, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = f(&self.get())?;
        Ok(self.set(next))
    }

    /// Step back one snapshot.
    pub fn undo(&self) {
        self.undo_by(1);
    }

    /// Step forward one snapshot.
    pub fn redo(&self) {
        self.redo_by(1);
    }

    /// Step back `times` snapshots, stopping at the oldest retained one.
    ///
    /// A negative count steps forward instead.
    pub fn undo_by(&self, times: isize) {
        self.navigate("undo", |engine| engine.undo(times));
    }

    /// Step forward `times` snapshots, stopping at the newest one.
    ///
    /// A negative count steps back instead.
    pub fn redo_by(&self, times: isize) {
        self.navigate("redo", |engine| engine.redo(times));
    }

    fn navigate<F>(&self, action: &'static str, step: F)
    where
        F: FnOnce(&mut HistoryEngine<T>) -> bool,
    {
        let current = {
            let mut engine = self.engine.lock();
            let moved = step(&mut *engine);
            tracing::trace!(action, moved, index = engine.current_index(), "navigate");
            if !moved {
                return;
            }
            engine.current().clone()
        };
        self.signal.set(current);
    }

    /// The current retention limit.
    pub fn history_limit(&self) -> HistoryLimit {
        self.engine.lock().limit()
    }

    /// Change the retention limit.
    ///
    /// This is a state transition, not a plain setter: shrinking below the
    /// number of stored snapshots evicts the oldest ones. The cursor keeps
    /// pointing at the same snapshot if it survives and otherwise lands on
    /// the oldest retained one, in which case subscribers are notified.
    pub fn set_history_limit(&self, limit: impl Into<HistoryLimit>) {
        let limit = limit.into();
        let current = {
            let mut engine = self.engine.lock();
            let eviction = engine.set_limit(limit);
            tracing::debug!(
                %limit,
                evicted = eviction.count,
                current_evicted = eviction.current_evicted,
                "history limit changed"
            );
            if !eviction.current_evicted {
                return;
            }
            engine.current().clone()
        };
        self.signal.set(current);
    }

    /// Every retained snapshot, oldest first.
    pub fn all_values(&self) -> Vec<T> {
        self.engine.lock().values().to_vec()
    }

    /// Snapshots older than the current one, oldest first.
    ///
    /// `limit` keeps only the most recent ones; `None` or a count below 1
    /// keeps all.
    pub fn previous_values(&self, limit: Option<isize>) -> Vec<T> {
        self.engine.lock().previous_values(limit).to_vec()
    }

    /// Position of the current snapshot in [`all_values`](Self::all_values).
    pub fn current_index(&self) -> usize {
        self.engine.lock().current_index()
    }

    /// Number of retained snapshots.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.engine.lock().len()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.lock().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.lock().can_redo()
    }

    /// Register an observer of the current value.
    ///
    /// The observer receives the current value immediately, then every value
    /// the cursor lands on.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.signal.subscribe(observer)
    }

    pub fn subscriber_count(&self) -> usize {
        self.signal.subscriber_count()
    }
}

impl<T> Clone for History<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            signal: self.signal.clone(),
        }
    }
}

impl<T> Debug for History<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let engine = self.engine.lock();
        f.debug_struct("History")
            .field("current_index", &engine.current_index())
            .field("len", &engine.len())
            .field("limit", &engine.limit())
            .field("current", engine.current())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
