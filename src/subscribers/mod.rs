//! # Event subscribers for the busvisor engine.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used by the bridge to deliver reconciliation events without ever
//! blocking a reconciler.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   reconcilers ── publish(Event) ──► Bus ──► bridge listener ──► SubscriberSet
//!                                                                      │
//!                                                 ┌────────────┬───────┴────┐
//!                                                 ▼            ▼            ▼
//!                                              [queue S1]  [queue S2]  [queue SN]
//!                                                 ▼            ▼            ▼
//!                                              worker S1   worker S2   worker SN
//!                                                 ▼            ▼            ▼
//!                                             on_event()   on_event()  on_event()
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use busvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct MetricsSubscriber;
//!
//! #[async_trait]
//! impl Subscribe for MetricsSubscriber {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::Parked {
//!             // increment unresolved-resource counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
