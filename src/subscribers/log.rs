//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [exposed] kind=topic name=/chatter type=std_msgs/String
//! [parked] kind=topic name=/camera/image reason=resolve_not_found
//! [deferred] kind=topic name=/chatter pending=3
//! [purged] kind=topic name=chatter
//! [expose-applied] kind=service added=2 removed=1
//! [watcher-batch] kind=action appeared=1 vanished=0
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event descriptions
/// to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new stdout logger.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let kind = e.resource_kind.map(|k| k.as_label()).unwrap_or("-");
        match e.kind {
            EventKind::Exposed => {
                println!(
                    "[exposed] kind={kind} name={:?} type={:?}",
                    e.resource, e.type_name
                );
            }
            EventKind::Parked => {
                println!(
                    "[parked] kind={kind} name={:?} reason={:?}",
                    e.resource, e.reason
                );
            }
            EventKind::Removed => {
                println!("[removed] kind={kind} name={:?}", e.resource);
            }
            EventKind::RemoveMissed => {
                println!("[remove-missed] kind={kind} name={:?}", e.resource);
            }
            EventKind::Deferred => {
                println!(
                    "[deferred] kind={kind} name={:?} pending={:?}",
                    e.resource, e.pending
                );
            }
            EventKind::Purged => {
                println!("[purged] kind={kind} name={:?}", e.resource);
            }
            EventKind::ExposeApplied => {
                println!(
                    "[expose-applied] kind={kind} added={:?} removed={:?}",
                    e.added, e.removed
                );
            }
            EventKind::ReconfigureApplied => {
                println!("[reconfigure-applied] kind={kind} patterns={:?}", e.added);
            }
            EventKind::WatcherBatch => {
                println!(
                    "[watcher-batch] kind={kind} appeared={:?} vanished={:?}",
                    e.added, e.removed
                );
            }
            EventKind::BridgeStarted => {
                println!("[bridge-started]");
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
