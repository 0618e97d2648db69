//! Rewind Core
//!
//! Reactive values with an optional bounded undo/redo history.
//!
//! - [`reactive`]: signals (single-value cells with replay-latest
//!   subscriptions) and the plain [`State`](reactive::State) handle.
//! - [`history`]: the history engine and the [`History`] handle built on a
//!   signal.
//! - [`config`]: settings for creating histories.
//!
//! Everything is synchronous. Each mutation delivers at most one value to
//! every subscriber before it returns.
//!
//! # Example
//!
//! ```rust
//! use rewind_core::{history, HistoryLimit};
//!
//! let countdown = history(String::from("10"), HistoryLimit::Unbounded);
//! let _sub = countdown.subscribe(|v| println!("{v}"));
//!
//! for i in (1..10).rev() {
//!     countdown.set(i.to_string());
//! }
//! countdown.set("Engine ignition confirmed.".into());
//! countdown.set("Oh wait! Wait!".into());
//! countdown.set("It's ok. False alarm.".into());
//!
//! countdown.undo_by(2);
//! countdown.set("Liftoff!".into());
//!
//! assert_eq!(countdown.previous_values(Some(1)), ["Engine ignition confirmed."]);
//! assert!(!countdown.can_redo());
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod reactive;

pub use config::HistoryConfig;
pub use error::{Error, Result};
pub use history::{history, History, HistoryLimit};
pub use reactive::{state, State};
