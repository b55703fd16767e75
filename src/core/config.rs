//! # Global bridge configuration.
//!
//! Provides [`BridgeConfig`], the centralized settings for the bridge runtime.
//!
//! Config is used in two ways:
//! 1. **Bridge creation**: `BridgeBuilder::new(config)`
//! 2. **Initial desired state**: the per-kind name lists are applied by
//!    `Bridge::start()` exactly as a later `reconfigure` call would be —
//!    entries containing `*` become patterns, the rest become the explicit
//!    desired list.

use crate::backend::ExposeFlags;

/// Global configuration for the bridge runtime.
///
/// Defines:
/// - **Event system**: bus capacity for event delivery
/// - **Watcher intake**: queue capacity for membership batches
/// - **Topic defaults**: publish/subscribe permissions used for
///   watcher-admitted topics and the initial configuration
/// - **Initial desired state**: per-kind name/pattern lists
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `watcher_queue_capacity`: bounded intake for `WatcherHandle::submit`
///   (min 1; clamped)
/// - `allow_publish` / `allow_subscribe`: default topic exposure flags
/// - `topics` / `services` / `actions`: raw operator-declared name lists;
///   entries containing `*` are treated as admission patterns
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items. Minimum value is 1 (enforced by
    /// Bus).
    pub bus_capacity: usize,

    /// Capacity of the watcher's membership-batch queue.
    ///
    /// When full, `WatcherHandle::submit` waits and `try_submit` returns a
    /// `Full` error.
    pub watcher_queue_capacity: usize,

    /// Default for inbound publications on exposed topics.
    ///
    /// Applied to watcher-admitted topics and to the initial configuration.
    /// `expose_topics` takes explicit flags per call.
    pub allow_publish: bool,

    /// Default for subscriptions/reads on exposed topics.
    pub allow_subscribe: bool,

    /// Initial desired topics (explicit names and `*` patterns).
    pub topics: Vec<String>,

    /// Initial desired services (explicit names and `*` patterns).
    pub services: Vec<String>,

    /// Initial desired actions (explicit names and `*` patterns).
    pub actions: Vec<String>,
}

impl BridgeConfig {
    /// Default topic exposure flags derived from this configuration.
    #[inline]
    pub fn topic_flags(&self) -> ExposeFlags {
        ExposeFlags {
            allow_publish: self.allow_publish,
            allow_subscribe: self.allow_subscribe,
        }
    }

    /// Returns the watcher queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn watcher_queue_capacity_clamped(&self) -> usize {
        self.watcher_queue_capacity.max(1)
    }

    /// Returns the bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` should use this value to avoid constructing an invalid
    /// channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for BridgeConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024` (good baseline)
    /// - `watcher_queue_capacity = 1024`
    /// - `allow_publish = true`, `allow_subscribe = true`
    /// - empty initial desired state
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            watcher_queue_capacity: 1024,
            allow_publish: true,
            allow_subscribe: true,
            topics: Vec::new(),
            services: Vec::new(),
            actions: Vec::new(),
        }
    }
}
