//! # Live handle capability contract.
//!
//! [`Handle`] is the least common denominator the reconciler needs from a
//! materialized resource of any kind. Kind-specific operations (publishing to a
//! topic, invoking a service, driving an action) stay on the concrete types the
//! backend constructs; the engine only tracks, drains and closes.

use std::sync::Arc;

/// # Minimal capability of a live backend handle.
///
/// One instance is constructed per exposed resource by
/// [`Backend::construct`](crate::backend::Backend::construct) and shared as a
/// [`HandleRef`].
///
/// Implementations must tolerate `close()` while other clones of the ref are
/// still held: a draining topic handle remains readable until its pending count
/// reaches zero.
pub trait Handle: Send + Sync + 'static {
    /// Canonical, fully-qualified bus name this handle is bound to.
    fn canonical_name(&self) -> &str;

    /// Backend type name resolved for this resource.
    fn type_name(&self) -> &str;

    /// Number of buffered inbound messages not yet consumed by a client.
    ///
    /// Drives deferred deletion for topics. Kinds without gateway-side
    /// buffering report 0.
    fn pending_unread(&self) -> usize {
        0
    }

    /// Releases backend resources. Must be idempotent.
    ///
    /// Called by the reconciler when an entry is destroyed, replaced, or
    /// purged after draining.
    fn close(&self);
}

/// Shared reference to a live handle.
pub type HandleRef = Arc<dyn Handle>;
