//! Reactive Primitives
//!
//! This module implements the value holders that everything else in the
//! crate is built on.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A [`Signal`] is a container for one current value. Observers subscribe to
//! it and are pushed every new value synchronously. A new observer first
//! receives the value the signal holds at subscription time, so a signal
//! behaves like a "current value" rather than an event stream.
//!
//! ## Subscriptions
//!
//! Subscribing returns a [`Subscription`]. Dropping it removes the observer.
//!
//! ## State
//!
//! [`State`] is a thin handle over a signal with the write conveniences used
//! by application code: updater functions, fallible updaters, and `patch` for
//! [`Merge`] values.

mod signal;
mod state;
mod subscriber;

pub use signal::Signal;
pub use state::{state, Merge, State};
pub use subscriber::{SubscriberId, Subscription};
