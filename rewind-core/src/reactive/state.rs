//! Plain State
//!
//! [`State`] is the history-less handle: a [`Signal`] plus the write
//! conveniences shared with [`History`](crate::history::History) (literal
//! values, updater functions, fallible updaters) and `patch` for values that
//! know how to merge a partial update into themselves.

use std::fmt::Debug;

use serde_json::{Map, Value};

use super::signal::Signal;
use super::subscriber::Subscription;

/// A value that can absorb a partial update.
///
/// `merge` must be pure: it returns the merged value and leaves `self` alone.
pub trait Merge: Sized {
    /// The partial update type.
    type Patch;

    /// Return `self` with `patch` applied on top.
    fn merge(&self, patch: Self::Patch) -> Self;
}

/// Shallow key-wise merge. Keys in the patch overwrite keys in the current
/// object; a non-object current value is replaced by the patch object.
impl Merge for Value {
    type Patch = Map<String, Value>;

    fn merge(&self, patch: Self::Patch) -> Self {
        let mut merged = match self {
            Value::Object(current) => current.clone(),
            _ => Map::new(),
        };
        merged.extend(patch);
        Value::Object(merged)
    }
}

/// A reactive value without history.
///
/// # Example
///
/// ```rust
/// use rewind_core::reactive::state;
///
/// let counter = state(1);
/// assert_eq!(counter.set(2), 2);
/// assert_eq!(counter.update(|n| n * 10), 20);
/// ```
pub struct State<T>
where
    T: Clone + Send + Sync + 'static,
{
    signal: Signal<T>,
}

/// Create a [`State`] holding `value`.
pub fn state<T>(value: T) -> State<T>
where
    T: Clone + Send + Sync + 'static,
{
    State::new(value)
}

impl<T> State<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            signal: Signal::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.signal.get()
    }

    /// Replace the value. Returns the new current value.
    pub fn set(&self, value: T) -> T {
        self.signal.set(value);
        self.signal.get()
    }

    /// Replace the value with `f(current)`. Returns the new current value.
    pub fn update<F>(&self, f: F) -> T
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.signal.get());
        self.set(next)
    }

    /// Like [`update`](Self::update), but leaves the state untouched when
    /// `f` fails.
    pub fn try_update<F, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = f(&self.signal.get())?;
        Ok(self.set(next))
    }

    /// Register an observer. See [`Signal::subscribe`].
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.signal.subscribe(observer)
    }

    /// The underlying signal.
    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }
}

impl<T> State<T>
where
    T: Merge + Clone + Send + Sync + 'static,
{
    /// Merge `patch` into the current value. Returns the new current value.
    pub fn patch(&self, patch: T::Patch) -> T {
        let merged = self.signal.get().merge(patch);
        self.set(merged)
    }

    /// Merge the patch produced by `f(current)` into the current value.
    pub fn patch_with<F>(&self, f: F) -> T
    where
        F: FnOnce(&T) -> T::Patch,
    {
        let current = self.signal.get();
        let patch = f(&current);
        self.set(current.merge(patch))
    }
}

impl<T> Clone for State<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
        }
    }
}

impl<T> Debug for State<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").field("signal", &self.signal).finish()
    }
}
