//! # busvisor
//!
//! **Busvisor** is the reconciliation engine of a resource-bus bridge: it keeps
//! the set of bus resources a gateway exposes (pub/sub topics, request/response
//! services, long-running actions) synchronized with an operator-declared
//! desired configuration and with live membership changes on the bus.
//!
//! The crate is a building block: the bus transport, payload serialization and
//! the HTTP front-end that consumes the exposed handles all live outside it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  operator config                         external discovery
//!  expose_*/reconfigure()                  WatcherHandle::submit(GraphBatch)
//!        │                                          │
//!        ▼                                          ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  Bridge                                                            │
//! │  - Bus (broadcast events)                                          │
//! │  - SubscriberSet (fans out to user subscribers)                    │
//! │  - GraphWatcher (dispatches membership batches)                    │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐    │
//! │  │ topic reconciler │ │ svc reconciler   │ │ action reconciler│    │
//! │  │  exposed map     │ │  exposed map     │ │  exposed map     │    │
//! │  │  waiting set     │ │  waiting set     │ │  waiting set     │    │
//! │  │  deferred map    │ │                  │ │                  │    │
//! │  │  desired+patterns│ │  desired+patterns│ │  desired+patterns│    │
//! │  └────────┬─────────┘ └────────┬─────────┘ └────────┬─────────┘    │
//! └───────────┼────────────────────┼────────────────────┼──────────────┘
//!             ▼                    ▼                    ▼
//!      Backend (topics)     Backend (services)   Backend (actions)
//!      resolve/construct    resolve/construct    resolve/construct
//! ```
//!
//! ### Name lifecycle
//! ```text
//! expose()/reconfigure()/pattern admission
//!   │
//!   ├─► resolve ok, construct ok ──► Exposed (local alias = canonical minus '/')
//!   │        re-add replaces, closes prior handle
//!   │
//!   └─► resolve/construct failed ──► Waiting
//!            retried on watcher redelivery or re-expose
//!
//! remove (topics):
//!   pending_unread() == 0 ──► closed
//!   pending_unread() >  0 ──► PendingDeletion (still readable via lookup)
//!                                 └─► purged once drained (next watcher pass)
//!
//! remove (services/actions): closed immediately
//! ```
//!
//! ## Features
//! | Area              | Description                                                             | Key types / traits                    |
//! |-------------------|-------------------------------------------------------------------------|---------------------------------------|
//! | **Reconciliation**| Desired-vs-actual resolution per kind, waiting retries, pattern admission.| [`Bridge`], [`DesiredUpdate`]        |
//! | **Backend seam**  | Type resolution and handle construction, injected per kind.             | [`Backend`], [`Handle`], [`HandleRef`]|
//! | **Watcher intake**| Bounded queue for membership batches from the external discovery.       | [`WatcherHandle`], [`GraphBatch`]     |
//! | **Subscriber API**| Hook into reconciliation events (logging, metrics, custom subscribers). | [`Subscribe`]                         |
//! | **Errors**        | Typed, recoverable errors; unified not-found signaling.                 | [`LookupError`], [`ReconcileError`]   |
//! | **Configuration** | Centralize runtime settings and initial desired state.                  | [`BridgeConfig`]                      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use busvisor::{
//!     Backend, BridgeBuilder, BridgeConfig, ExposeFlags, GraphBatch, Handle, HandleRef,
//!     Kind, ResolveError,
//! };
//!
//! struct EchoHandle {
//!     canonical: String,
//!     type_name: String,
//! }
//!
//! impl Handle for EchoHandle {
//!     fn canonical_name(&self) -> &str { &self.canonical }
//!     fn type_name(&self) -> &str { &self.type_name }
//!     fn close(&self) {}
//! }
//!
//! struct StaticBackend;
//!
//! #[async_trait]
//! impl Backend for StaticBackend {
//!     async fn resolve(&self, canonical: &str) -> Result<String, ResolveError> {
//!         match canonical {
//!             "/chatter" => Ok("std_msgs/String".to_string()),
//!             _ => Err(ResolveError::NotFound),
//!         }
//!     }
//!
//!     async fn construct(
//!         &self,
//!         canonical: &str,
//!         type_name: &str,
//!         _flags: ExposeFlags,
//!     ) -> Result<HandleRef, ResolveError> {
//!         Ok(Arc::new(EchoHandle {
//!             canonical: canonical.to_string(),
//!             type_name: type_name.to_string(),
//!         }))
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = BridgeConfig::default();
//!     cfg.topics = vec!["/chatter".to_string(), "/cam/*".to_string()];
//!
//!     let bridge = BridgeBuilder::new(cfg)
//!         .with_topic_backend(Arc::new(StaticBackend))
//!         .build();
//!     bridge.start().await?;
//!
//!     // "/chatter" was desired and resolvable: exposed under its local alias.
//!     let topic = bridge.get_topic("chatter").await?;
//!     assert_eq!(topic.type_name(), "std_msgs/String");
//!
//!     // The external discovery feeds membership changes through the handle;
//!     // "/cam/*" admits matching names as they appear.
//!     let watcher = bridge.watcher_handle();
//!     watcher
//!         .submit(GraphBatch::appeared(Kind::Topic, vec!["/cam/left".to_string()]))
//!         .await?;
//!
//!     bridge.shutdown().await;
//!     Ok(())
//! }
//! ```

mod backend;
mod core;
mod error;
mod events;
mod patterns;
mod subscribers;
mod watcher;

// ---- Public re-exports ----

pub use backend::{Backend, ExposeFlags, Handle, HandleRef, Kind};
pub use crate::core::{Bridge, BridgeBuilder, BridgeConfig, DesiredUpdate};
pub use error::{BridgeError, LookupError, ReconcileError, ResolveError};
pub use events::{Bus, Event, EventKind};
pub use patterns::PatternSet;
pub use subscribers::{Subscribe, SubscriberSet};
pub use watcher::{GraphBatch, SubmitError, WatcherHandle};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
