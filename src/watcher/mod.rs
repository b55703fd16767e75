//! # Graph watcher intake: membership batches from the bus.
//!
//! The discovery mechanism itself lives outside this crate. Whatever watches
//! the bus graph pushes [`GraphBatch`] values through a [`WatcherHandle`]; the
//! internal `GraphWatcher` loop dispatches each batch to the matching per-kind
//! reconciler.
//!
//! ## Architecture
//! ```text
//! external discovery ── submit(GraphBatch) ──► [bounded mpsc queue]
//!                                                     │
//!                                          GraphWatcher loop (spawned task,
//!                                          select! over CancellationToken)
//!                                                     │
//!                              ┌──────────────────────┼──────────────────────┐
//!                              ▼                      ▼                      ▼
//!                       topic reconciler      service reconciler      action reconciler
//!                       .on_graph_event()     .on_graph_event()       .on_graph_event()
//! ```
//!
//! ## Rules
//! - Batches for one kind are processed strictly in submission order.
//! - The queue is bounded: `submit` waits for space, `try_submit` fails fast.
//! - The loop stops when the bridge's runtime token is cancelled.

mod batch;
mod core;
mod error;

pub use batch::GraphBatch;
pub use error::SubmitError;
pub use self::core::WatcherHandle;

pub(crate) use self::core::GraphWatcher;
