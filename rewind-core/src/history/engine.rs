//! History Engine
//!
//! The state machine behind [`History`](super::History): an ordered list of
//! snapshots, a cursor into it, and a retention limit.
//!
//! # Invariants
//!
//! - `values` is never empty. It starts as `[seed]`.
//! - `current_index < values.len()` after every public call.
//! - `values.len() <= limit` whenever the limit is bounded.
//!
//! # Algorithm
//!
//! `push` truncates everything after the cursor (history is linear, so a new
//! value after an undo discards the redo branch), appends, evicts from the
//! front down to the limit, and moves the cursor to the end. The pushed value
//! is never evicted by its own insertion because a bounded limit is at
//! least 1.
//!
//! `undo` and `redo` only move the cursor and saturate at either end.
//!
//! Shrinking the limit evicts from the front. The cursor is pulled back by
//! the number of evicted snapshots, stopping at 0, so it keeps pointing at
//! the same snapshot whenever that snapshot survives.
//!
//! The engine does no notification. Every mutation reports whether the
//! current snapshot changed and the caller decides what to emit.

use super::limit::HistoryLimit;

/// Result of reconciling the stored snapshots with a new limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    /// Number of snapshots dropped from the front.
    pub count: usize,
    /// Whether the snapshot under the cursor was among them.
    pub current_evicted: bool,
}

/// Bounded, linear undo/redo history of full-value snapshots.
#[derive(Debug, Clone)]
pub struct HistoryEngine<T> {
    /// Snapshots, oldest first.
    values: Vec<T>,
    /// Position of the current snapshot in `values`.
    current_index: usize,
    limit: HistoryLimit,
}

impl<T> HistoryEngine<T> {
    /// Create an unbounded history holding only `seed`.
    pub fn new(seed: T) -> Self {
        Self::with_limit(seed, HistoryLimit::Unbounded)
    }

    /// Create a history holding only `seed`.
    pub fn with_limit(seed: T, limit: HistoryLimit) -> Self {
        Self {
            values: vec![seed],
            current_index: 0,
            limit,
        }
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &T {
        &self.values[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of retained snapshots. Always at least 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Whether there is an older snapshot to move to.
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Whether there is a newer snapshot to move to.
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.values.len()
    }

    /// Record `value` as the new current snapshot.
    ///
    /// Returns the number of old snapshots evicted to honour the limit.
    pub fn push(&mut self, value: T) -> usize {
        self.values.truncate(self.current_index + 1);
        self.values.push(value);
        let evicted = self.trim_front();
        self.current_index = self.values.len() - 1;
        evicted
    }

    /// Move the cursor `times` snapshots back, stopping at the oldest.
    ///
    /// A negative count moves forward instead, exactly like
    /// `redo(-times)`. Returns whether the cursor moved.
    pub fn undo(&mut self, times: isize) -> bool {
        if times < 0 {
            return self.step_forward(times.unsigned_abs());
        }
        self.step_back(times.unsigned_abs())
    }

    /// Move the cursor `times` snapshots forward, stopping at the newest.
    ///
    /// A negative count moves back instead. Returns whether the cursor moved.
    pub fn redo(&mut self, times: isize) -> bool {
        if times < 0 {
            return self.step_back(times.unsigned_abs());
        }
        self.step_forward(times.unsigned_abs())
    }

    fn step_back(&mut self, steps: usize) -> bool {
        self.move_to(self.current_index.saturating_sub(steps))
    }

    fn step_forward(&mut self, steps: usize) -> bool {
        let newest = self.values.len() - 1;
        self.move_to(self.current_index.saturating_add(steps).min(newest))
    }

    fn move_to(&mut self, index: usize) -> bool {
        let moved = index != self.current_index;
        self.current_index = index;
        moved
    }

    /// Replace the retention limit and evict whatever no longer fits.
    ///
    /// Growing the limit or making it unbounded never evicts.
    pub fn set_limit(&mut self, limit: HistoryLimit) -> Eviction {
        self.limit = limit;
        let count = self.trim_front();
        let current_evicted = self.current_index < count;
        self.current_index = self.current_index.saturating_sub(count);
        Eviction {
            count,
            current_evicted,
        }
    }

    /// Drop the oldest snapshots until the limit is satisfied.
    fn trim_front(&mut self) -> usize {
        let Some(max) = self.limit.get() else {
            return 0;
        };
        let excess = self.values.len().saturating_sub(max);
        if excess > 0 {
            self.values.drain(..excess);
            tracing::debug!(evicted = excess, retained = self.values.len(), "trimmed history");
        }
        debug_assert!(self.limit.admits(self.values.len()));
        excess
    }

    /// Every retained snapshot, oldest first.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Snapshots strictly older than the current one, oldest first.
    ///
    /// `limit` caps how many of the most recent ones are returned. `None` or
    /// a count below 1 returns all of them.
    pub fn previous_values(&self, limit: Option<isize>) -> &[T] {
        let end = self.current_index;
        let take = match limit {
            Some(n) if n >= 1 => n.unsigned_abs().min(end),
            _ => end,
        };
        &self.values[end - take..end]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(seed: &'static str, rest: &[&'static str]) -> HistoryEngine<&'static str> {
        let mut engine = HistoryEngine::new(seed);
        for value in rest {
            engine.push(*value);
        }
        engine
    }

    #[test]
    fn seed_is_only_value() {
        let engine = HistoryEngine::new("homepage");
        assert_eq!(*engine.current(), "homepage");
        assert_eq!(engine.values(), ["homepage"]);
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
    }

    #[test]
    fn push_appends_and_moves_cursor() {
        let engine = engine_with("homepage", &["about", "clients"]);
        assert_eq!(engine.values(), ["homepage", "about", "clients"]);
        assert_eq!(engine.current_index(), 2);
        assert_eq!(*engine.current(), "clients");
    }

    #[test]
    fn undo_and_redo_saturate() {
        let mut engine = engine_with("a", &["b", "c"]);

        assert!(engine.undo(1));
        assert_eq!(*engine.current(), "b");

        assert!(engine.undo(100));
        assert_eq!(*engine.current(), "a");
        assert!(!engine.undo(1));

        assert!(engine.redo(isize::MAX));
        assert_eq!(*engine.current(), "c");
        assert!(!engine.redo(1));
    }

    #[test]
    fn negative_counts_navigate_the_other_way() {
        let mut engine = engine_with("a", &["b", "c"]);

        engine.undo(2);
        assert!(engine.undo(-1));
        assert_eq!(*engine.current(), "b");

        assert!(engine.redo(-1));
        assert_eq!(*engine.current(), "a");

        assert!(engine.undo(isize::MIN));
        assert_eq!(*engine.current(), "c");
    }

    #[test]
    fn zero_steps_do_not_move() {
        let mut engine = engine_with("a", &["b"]);
        assert!(!engine.undo(0));
        assert!(!engine.redo(0));
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut engine = engine_with("a", &["b", "c", "d"]);
        engine.undo(2);
        engine.push("x");

        assert_eq!(engine.values(), ["a", "b", "x"]);
        assert!(!engine.can_redo());
        assert!(!engine.redo(1));
        assert_eq!(*engine.current(), "x");
    }

    #[test]
    fn bounded_push_evicts_oldest() {
        let mut engine = HistoryEngine::with_limit("homepage", HistoryLimit::from(1usize));
        assert_eq!(engine.push("about"), 1);
        engine.push("page1");
        engine.push("page2");

        assert_eq!(engine.values(), ["page2"]);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn bounded_push_keeps_most_recent_window() {
        let mut engine = HistoryEngine::with_limit(0, HistoryLimit::from(3usize));
        for value in 1..=10 {
            engine.push(value);
            assert!(engine.len() <= 3);
        }
        assert_eq!(engine.values(), [8, 9, 10]);
    }

    #[test]
    fn shrinking_limit_keeps_current_snapshot_when_it_survives() {
        let mut engine = engine_with("initial", &["value1", "value2", "value3"]);

        let eviction = engine.set_limit(HistoryLimit::from(2usize));

        assert_eq!(
            eviction,
            Eviction {
                count: 2,
                current_evicted: false
            }
        );
        assert_eq!(engine.values(), ["value2", "value3"]);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(*engine.current(), "value3");
    }

    #[test]
    fn shrinking_limit_while_navigated_clamps_to_oldest() {
        let mut engine = engine_with("a", &["b", "c", "d"]);
        engine.undo(2);
        assert_eq!(*engine.current(), "b");

        let eviction = engine.set_limit(HistoryLimit::from(2usize));

        assert!(eviction.current_evicted);
        assert_eq!(engine.values(), ["c", "d"]);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(*engine.current(), "c");
    }

    #[test]
    fn shrinking_limit_while_navigated_inside_window() {
        let mut engine = engine_with("a", &["b", "c", "d", "e"]);
        engine.undo(1);

        let eviction = engine.set_limit(HistoryLimit::from(3usize));

        assert!(!eviction.current_evicted);
        assert_eq!(engine.values(), ["c", "d", "e"]);
        assert_eq!(*engine.current(), "d");
        assert!(engine.can_redo());
    }

    #[test]
    fn growing_or_unbounding_limit_never_evicts() {
        let mut engine = HistoryEngine::with_limit(1, HistoryLimit::from(2usize));
        engine.push(2);
        engine.push(3);
        engine.undo(1);

        let eviction = engine.set_limit(HistoryLimit::from(10usize));
        assert_eq!(eviction.count, 0);

        let eviction = engine.set_limit(HistoryLimit::from(0usize));
        assert_eq!(eviction.count, 0);
        assert_eq!(engine.limit(), HistoryLimit::Unbounded);
        assert_eq!(engine.values(), [2, 3]);
        assert_eq!(*engine.current(), 2);
    }

    #[test]
    fn previous_values_excludes_current() {
        let engine = engine_with("homepage", &["about", "clients", "commands"]);

        assert_eq!(engine.previous_values(None), ["homepage", "about", "clients"]);
        assert_eq!(engine.previous_values(Some(0)), ["homepage", "about", "clients"]);
        assert_eq!(engine.previous_values(Some(2)), ["about", "clients"]);
        assert_eq!(engine.previous_values(Some(99)), ["homepage", "about", "clients"]);
        assert_eq!(engine.previous_values(Some(-1)), ["homepage", "about", "clients"]);
    }

    #[test]
    fn previous_values_follow_the_cursor() {
        let mut engine = engine_with("a", &["b", "c", "d"]);
        engine.undo(2);
        assert_eq!(engine.previous_values(None), ["a"]);

        engine.undo(1);
        assert!(engine.previous_values(None).is_empty());
    }
}
