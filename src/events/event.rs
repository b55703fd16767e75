//! # Reconciliation events emitted by the engine.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Exposure events**: a resource changed tracking state (exposed, parked,
//!   removed, deferred, purged)
//! - **Batch events**: a full reconciliation or reconfiguration pass completed
//! - **Watcher events**: a membership batch arrived from the graph watcher
//! - **Lifecycle events**: bridge start/shutdown
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! resource's canonical name, its kind, and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::backend::Kind;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of reconciliation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Exposure events ===
    /// A resource was resolved, constructed, and moved to the actual-state map.
    ///
    /// Sets:
    /// - `resource`: canonical name
    /// - `resource_kind`
    /// - `type_name`: resolved backend type
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Exposed,

    /// Resolution or construction failed; the name was parked in the waiting
    /// set. Warning-grade.
    ///
    /// Sets:
    /// - `resource`: canonical name
    /// - `resource_kind`
    /// - `reason`: resolver/factory error label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Parked,

    /// A tracked resource was destroyed (or dropped from waiting).
    ///
    /// Sets:
    /// - `resource`: canonical name
    /// - `resource_kind`
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Removed,

    /// A remove targeted a name tracked nowhere. Warning-grade; the
    /// reconciliation pass continues.
    ///
    /// Sets:
    /// - `resource`: canonical name
    /// - `resource_kind`
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RemoveMissed,

    /// A topic with pending unread data was moved to deferred deletion instead
    /// of being destroyed.
    ///
    /// Sets:
    /// - `resource`: canonical name
    /// - `resource_kind`: always `Kind::Topic`
    /// - `pending`: unread count at deferral time
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Deferred,

    /// A deferred topic finished draining and was destroyed.
    ///
    /// Sets:
    /// - `resource`: local name
    /// - `resource_kind`: always `Kind::Topic`
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Purged,

    // === Batch events ===
    /// A full expose pass was applied and the stored desired list replaced.
    ///
    /// Sets:
    /// - `resource_kind`
    /// - `added`: names newly requested this pass
    /// - `removed`: names dropped from the desired list this pass
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ExposeApplied,

    /// A reconfiguration was partitioned into patterns and plain names.
    /// Warning-grade, mirrors the operator-facing configuration log.
    ///
    /// Sets:
    /// - `resource_kind`
    /// - `added`: new patterns stored
    /// - `removed`: always 0 (patterns accumulate)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ReconfigureApplied,

    // === Watcher events ===
    /// A membership batch was received from the graph watcher.
    ///
    /// Sets:
    /// - `resource_kind`
    /// - `added`: appeared-name count
    /// - `removed`: vanished-name count
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WatcherBatch,

    // === Lifecycle events ===
    /// The bridge applied its initial configuration and started the watcher
    /// loop.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    BridgeStarted,

    /// Shutdown requested; handles are being closed.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,
}

/// Reconciliation event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Canonical (or, for `Purged`, local) name of the resource, if applicable.
    pub resource: Option<Arc<str>>,
    /// Kind of the resource or batch, if applicable.
    pub resource_kind: Option<Kind>,
    /// Resolved backend type name (set by `Exposed`).
    pub type_name: Option<Arc<str>>,
    /// Human-readable reason (resolution failures, etc.).
    pub reason: Option<Arc<str>>,
    /// Pending unread count (set by `Deferred`).
    pub pending: Option<u32>,
    /// Added/appeared count for batch events.
    pub added: Option<u32>,
    /// Removed/vanished count for batch events.
    pub removed: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            resource: None,
            resource_kind: None,
            type_name: None,
            reason: None,
            pending: None,
            added: None,
            removed: None,
        }
    }

    /// Attaches a resource name.
    #[inline]
    pub fn with_resource(mut self, name: impl Into<Arc<str>>) -> Self {
        self.resource = Some(name.into());
        self
    }

    /// Attaches the resource kind.
    #[inline]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.resource_kind = Some(kind);
        self
    }

    /// Attaches the resolved backend type name.
    #[inline]
    pub fn with_type(mut self, type_name: impl Into<Arc<str>>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a pending unread count (stored compact).
    #[inline]
    pub fn with_pending(mut self, pending: usize) -> Self {
        self.pending = Some(pending.min(u32::MAX as usize) as u32);
        self
    }

    /// Attaches added/removed counts for batch events (stored compact).
    #[inline]
    pub fn with_counts(mut self, added: usize, removed: usize) -> Self {
        self.added = Some(added.min(u32::MAX as usize) as u32);
        self.removed = Some(removed.min(u32::MAX as usize) as u32);
        self
    }
}
