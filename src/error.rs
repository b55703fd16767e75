//! Error types used by the busvisor reconciliation engine.
//!
//! This module defines the error enums of the crate:
//!
//! - [`ResolveError`] — the backend could not resolve or construct a resource.
//! - [`ReconcileError`] — a reconciliation operation was asked to act on a name
//!   it does not track.
//! - [`LookupError`] — the unified "not exposed" signal returned by lookups.
//! - [`BridgeError`] — errors raised by the bridge lifecycle itself.
//!
//! All types provide `as_label()` returning a short stable snake_case label for
//! logging and metrics.
//!
//! Resolution failures are recoverable by design: the affected name is parked in
//! the waiting set and retried when the graph watcher redelivers it. They never
//! propagate out of a reconciliation pass.

use thiserror::Error;

use crate::backend::Kind;

/// # Errors produced by the backend resolver/factory.
///
/// Both variants are treated identically by the reconciler state machine: the
/// name is parked in the waiting set and a warning-grade event is published.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The backend has no type information for the name (yet).
    #[error("backend type not found")]
    NotFound,

    /// Transport-level failure while talking to the backend.
    #[error("backend transport error: {reason}")]
    Transport {
        /// Underlying error message.
        reason: String,
    },
}

impl ResolveError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use busvisor::ResolveError;
    ///
    /// assert_eq!(ResolveError::NotFound.as_label(), "resolve_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ResolveError::NotFound => "resolve_not_found",
            ResolveError::Transport { .. } => "resolve_transport",
        }
    }
}

/// # Errors produced by reconciliation operations.
///
/// Recoverable by contract: the reconciler stays operable after any of these.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A remove was requested for a name absent from the actual-state map, the
    /// waiting set and the deferred-deletion map alike.
    #[error("{kind} '{name}' is not tracked")]
    NotTracked {
        /// Resource kind the operation targeted.
        kind: Kind,
        /// Canonical name that was requested.
        name: String,
    },
}

impl ReconcileError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReconcileError::NotTracked { .. } => "reconcile_not_tracked",
        }
    }
}

/// # The unified "not exposed" lookup signal.
///
/// All three kinds report a missing resource the same way; there is no null
/// sentinel and no panicking variant.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name is neither exposed nor retrievable as a draining topic.
    #[error("{kind} '{name}' is not exposed")]
    NotExposed {
        /// Resource kind the lookup targeted.
        kind: Kind,
        /// Name as given by the caller.
        name: String,
    },
}

impl LookupError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use busvisor::{Kind, LookupError};
    ///
    /// let err = LookupError::NotExposed { kind: Kind::Topic, name: "chatter".into() };
    /// assert_eq!(err.as_label(), "lookup_not_exposed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LookupError::NotExposed { .. } => "lookup_not_exposed",
        }
    }
}

/// # Errors produced by the bridge lifecycle.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// `start()` was called on a bridge that is already running.
    #[error("bridge already started")]
    AlreadyStarted,
}

impl BridgeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BridgeError::AlreadyStarted => "bridge_already_started",
        }
    }
}
