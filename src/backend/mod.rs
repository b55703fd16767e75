//! # Backend seam: resource kinds, live handles, and the resolver/factory.
//!
//! The reconciliation engine never talks to the bus transport directly. It sees
//! the backend through two small contracts:
//!
//! - [`Backend`] resolves a canonical name to its backend type and constructs a
//!   live [`Handle`] for it (one implementation per kind is wired into the
//!   bridge).
//! - [`Handle`] is the minimal capability every kind shares: identity, type,
//!   pending-unread count (meaningful for topics) and close. Kind-specific
//!   surface (publish, call, goal submission, ...) lives on the concrete handle
//!   types behind the gateway, outside this crate.
//!
//! The common handle currency is [`HandleRef`], an `Arc<dyn Handle>` suitable
//! for sharing between the reconciler and gateway request handlers.

mod handle;
mod resolver;

pub use handle::{Handle, HandleRef};
pub use resolver::Backend;

use std::fmt;

/// The three resource kinds reconciled in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Publish/subscribe topic.
    Topic,
    /// Request/response service.
    Service,
    /// Long-running action.
    Action,
}

impl Kind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Kind::Topic => "topic",
            Kind::Service => "service",
            Kind::Action => "action",
        }
    }

    /// True if removal of an exposed resource of this kind is deferred while
    /// its handle still reports pending unread data.
    ///
    /// Only topics buffer inbound data on the gateway side; services and
    /// actions are closed immediately.
    pub(crate) fn defers_deletion(&self) -> bool {
        matches!(self, Kind::Topic)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Kind-specific construction flags, forwarded to [`Backend::construct`].
///
/// Only meaningful for topics; services and actions ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposeFlags {
    /// Allow inbound publications through the exposed handle.
    pub allow_publish: bool,
    /// Allow subscriptions/reads through the exposed handle.
    pub allow_subscribe: bool,
}

impl Default for ExposeFlags {
    /// Both directions enabled.
    fn default() -> Self {
        Self {
            allow_publish: true,
            allow_subscribe: true,
        }
    }
}

/// Strips the leading `/` from a canonical bus name, yielding the local (alias)
/// name under which the resource is exposed.
///
/// Lookups accept either form, so this is applied on both the write and the
/// read path.
pub(crate) fn local_name(canonical: &str) -> &str {
    canonical.strip_prefix('/').unwrap_or(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_single_leading_slash() {
        assert_eq!(local_name("/chatter"), "chatter");
        assert_eq!(local_name("/ns/chatter"), "ns/chatter");
    }

    #[test]
    fn test_local_name_keeps_bare_names() {
        assert_eq!(local_name("chatter"), "chatter");
        assert_eq!(local_name(""), "");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(Kind::Topic.as_label(), "topic");
        assert_eq!(Kind::Service.as_label(), "service");
        assert_eq!(Kind::Action.as_label(), "action");
        assert!(Kind::Topic.defers_deletion());
        assert!(!Kind::Service.defers_deletion());
        assert!(!Kind::Action.defers_deletion());
    }
}
