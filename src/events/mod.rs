//! # Runtime events published by the reconciliation engine.
//!
//! Every state transition in a reconciler publishes an [`Event`] on the
//! [`Bus`]; subscribers observe the full reconciliation history without the
//! engine ever blocking on them.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                      Subscriber (one):
//!   topic reconciler  ──┐
//!   service reconciler ─┼────► Bus ─────► subscriber_listener ────► SubscriberSet
//!   action reconciler ──┤ (broadcast chan)   (in Bridge)
//!   graph watcher     ──┘
//! ```

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
