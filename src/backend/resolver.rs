//! # Backend type resolver and handle factory.
//!
//! One [`Backend`] implementation is wired into the bridge per resource kind.
//! Resolution and construction may block on network round-trips internally; the
//! reconciler treats both as opaque calls and imposes no timeout of its own —
//! callers own that policy.

use async_trait::async_trait;

use super::{ExposeFlags, HandleRef};
use crate::error::ResolveError;

/// # Resolver/factory contract for one resource kind.
///
/// Failures from either method are recoverable from the engine's perspective:
/// the affected name is parked in the waiting set and retried when the watcher
/// redelivers it or an expose call re-requests it.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use busvisor::{Backend, ExposeFlags, HandleRef, ResolveError};
///
/// struct StaticBackend;
///
/// #[async_trait]
/// impl Backend for StaticBackend {
///     async fn resolve(&self, canonical: &str) -> Result<String, ResolveError> {
///         match canonical {
///             "/chatter" => Ok("std_msgs/String".to_string()),
///             _ => Err(ResolveError::NotFound),
///         }
///     }
///
///     async fn construct(
///         &self,
///         _canonical: &str,
///         _type_name: &str,
///         _flags: ExposeFlags,
///     ) -> Result<HandleRef, ResolveError> {
///         Err(ResolveError::Transport { reason: "not wired in this example".into() })
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Resolves the backend type of a canonical name.
    ///
    /// Returns [`ResolveError::NotFound`] when the type cannot be determined
    /// yet; transport-level failures map to [`ResolveError::Transport`]. The
    /// state machine treats both identically.
    async fn resolve(&self, canonical: &str) -> Result<String, ResolveError>;

    /// Constructs a live handle for a resolved name.
    ///
    /// `flags` carry kind-specific options (publish/subscribe permissions for
    /// topics); other kinds may ignore them.
    async fn construct(
        &self,
        canonical: &str,
        type_name: &str,
        flags: ExposeFlags,
    ) -> Result<HandleRef, ResolveError>;
}
