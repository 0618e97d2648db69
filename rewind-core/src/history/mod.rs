//! Undo/Redo History
//!
//! A history is a reactive value that remembers the values it held. The
//! pieces, leaf first:
//!
//! - [`HistoryLimit`]: how many snapshots to retain, or unbounded.
//! - [`HistoryEngine`]: the snapshot list and cursor, with all index
//!   arithmetic, eviction, and limit reconciliation. Pure and synchronous.
//! - [`History`]: the shareable handle. It owns an engine and a
//!   [`Signal`](crate::reactive::Signal) and emits the current snapshot
//!   whenever the cursor lands somewhere new.
//!
//! History is strictly linear. Setting a value after an undo discards every
//! snapshot newer than the cursor.

mod engine;
mod handle;
mod limit;

pub use engine::{Eviction, HistoryEngine};
pub use handle::{history, History};
pub use limit::HistoryLimit;
