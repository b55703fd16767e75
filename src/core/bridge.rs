//! # Bridge: facade over the three reconcilers, event delivery, and lifecycle.
//!
//! The [`Bridge`] owns the event bus, a [`SubscriberSet`], the per-kind
//! reconcilers and the graph-watcher loop. The gateway layer drives it through
//! the expose/get operations; the external discovery feeds it through the
//! [`WatcherHandle`].
//!
//! ## High-level architecture
//! ```text
//! gateway layer                     external discovery
//!   expose_*/get_*()                  WatcherHandle::submit(GraphBatch)
//!        │                                   │
//!        ▼                                   ▼
//!   ┌─────────────────────────┐      ┌──────────────┐
//!   │  Bridge                 │◄─────│ GraphWatcher │ (spawned loop)
//!   │  ├─ topic reconciler    │      └──────────────┘
//!   │  ├─ service reconciler  │
//!   │  └─ action reconciler   │──► Bus ──► listener ──► SubscriberSet
//!   └─────────────────────────┘
//!
//! Lifecycle:
//!   BridgeBuilder::build() ──► Bridge::start()   (initial config + watcher loop)
//!                                   │
//!                              Bridge::shutdown() (cancel loop, close handles)
//! ```
//!
//! A bridge runs at most once: `start` → `shutdown`. It is not restartable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::{ExposeFlags, HandleRef};
use crate::core::config::BridgeConfig;
use crate::core::reconciler::Reconciler;
use crate::error::{BridgeError, LookupError};
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::SubscriberSet;
use crate::watcher::{GraphWatcher, WatcherHandle};

/// Per-kind raw desired lists for a reconfiguration pass.
///
/// Entries containing `*` are merged into the kind's admission patterns; the
/// rest replace the kind's explicit desired list (empty lists leave the stored
/// list untouched).
#[derive(Clone, Debug, Default)]
pub struct DesiredUpdate {
    /// Raw topic names and patterns.
    pub topics: Vec<String>,
    /// Raw service names and patterns.
    pub services: Vec<String>,
    /// Raw action names and patterns.
    pub actions: Vec<String>,
}

/// Coordinates the per-kind reconcilers, event delivery, and lifecycle.
pub struct Bridge {
    /// Global runtime configuration.
    pub cfg: BridgeConfig,
    /// Event bus shared with the reconcilers and the watcher.
    pub bus: Bus,

    subs: Arc<SubscriberSet>,
    topics: Arc<Reconciler>,
    services: Arc<Reconciler>,
    actions: Arc<Reconciler>,
    watcher: Arc<GraphWatcher>,
    runtime_token: CancellationToken,
    started: AtomicBool,
}

impl Bridge {
    /// Assembled by [`BridgeBuilder`](crate::core::BridgeBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_internal(
        cfg: BridgeConfig,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        topics: Arc<Reconciler>,
        services: Arc<Reconciler>,
        actions: Arc<Reconciler>,
        watcher: Arc<GraphWatcher>,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            topics,
            services,
            actions,
            watcher,
            runtime_token,
            started: AtomicBool::new(false),
        }
    }

    /// Applies the initial desired configuration and starts the watcher loop
    /// and the subscriber listener.
    ///
    /// Returns [`BridgeError::AlreadyStarted`] on a second call.
    pub async fn start(&self) -> Result<(), BridgeError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(BridgeError::AlreadyStarted);
        }

        self.subscriber_listener();
        Arc::clone(&self.watcher).run(self.runtime_token.child_token());

        let initial = DesiredUpdate {
            topics: self.cfg.topics.clone(),
            services: self.cfg.services.clone(),
            actions: self.cfg.actions.clone(),
        };
        self.reconfigure(initial).await;

        self.bus.publish(Event::now(EventKind::BridgeStarted));
        Ok(())
    }

    /// Stops the watcher loop and closes every live and deferred handle.
    pub async fn shutdown(&self) {
        self.bus.publish(Event::now(EventKind::ShutdownRequested));
        self.runtime_token.cancel();

        self.topics.close_all().await;
        self.services.close_all().await;
        self.actions.close_all().await;
    }

    /// Handle through which the external discovery pushes membership batches.
    pub fn watcher_handle(&self) -> WatcherHandle {
        self.watcher.handle()
    }

    // ---------------------------
    // Expose operations (full reconciliation per kind)
    // ---------------------------

    /// Reconciles the exposed topic set against `names`.
    ///
    /// `allow_publish`/`allow_subscribe` apply to topics added by this pass;
    /// watcher-driven admissions use the configured defaults.
    pub async fn expose_topics(
        &self,
        names: Vec<String>,
        allow_publish: bool,
        allow_subscribe: bool,
    ) {
        let flags = ExposeFlags {
            allow_publish,
            allow_subscribe,
        };
        self.topics.expose(names, flags).await;
    }

    /// Reconciles the exposed service set against `names`.
    pub async fn expose_services(&self, names: Vec<String>) {
        self.services.expose(names, ExposeFlags::default()).await;
    }

    /// Reconciles the exposed action set against `names`.
    pub async fn expose_actions(&self, names: Vec<String>) {
        self.actions.expose(names, ExposeFlags::default()).await;
    }

    /// Applies a configuration update across all three kinds and returns the
    /// applied copy.
    ///
    /// Pattern-bearing entries accumulate into each kind's admission patterns;
    /// plain names go through the same full reconciliation as the expose
    /// operations.
    pub async fn reconfigure(&self, update: DesiredUpdate) -> DesiredUpdate {
        self.topics
            .reconfigure(update.topics.clone(), self.cfg.topic_flags())
            .await;
        self.services
            .reconfigure(update.services.clone(), ExposeFlags::default())
            .await;
        self.actions
            .reconfigure(update.actions.clone(), ExposeFlags::default())
            .await;
        update
    }

    // ---------------------------
    // Lookups (unified not-found signaling)
    // ---------------------------

    /// Live handle for an exposed topic, or a draining one that still holds
    /// unread data.
    pub async fn get_topic(&self, name: &str) -> Result<HandleRef, LookupError> {
        self.topics.lookup(name).await
    }

    /// Live handle for an exposed service.
    pub async fn get_service(&self, name: &str) -> Result<HandleRef, LookupError> {
        self.services.lookup(name).await
    }

    /// Live handle for an exposed action.
    pub async fn get_action(&self, name: &str) -> Result<HandleRef, LookupError> {
        self.actions.lookup(name).await
    }

    /// Sorted local names of currently exposed topics.
    pub async fn topic_names(&self) -> Vec<String> {
        self.topics.list().await
    }

    /// Sorted local names of currently exposed services.
    pub async fn service_names(&self) -> Vec<String> {
        self.services.list().await
    }

    /// Sorted local names of currently exposed actions.
    pub async fn action_names(&self) -> Vec<String> {
        self.actions.list().await
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::backend::{Backend, Kind};
    use crate::core::testutil::MockBackend;
    use crate::core::BridgeBuilder;
    use crate::watcher::GraphBatch;

    struct Fixture {
        bridge: Arc<Bridge>,
        topics: Arc<MockBackend>,
        services: Arc<MockBackend>,
    }

    async fn fixture(cfg: BridgeConfig) -> Fixture {
        let topics = MockBackend::new();
        let services = MockBackend::new();
        let actions = MockBackend::new();
        let bridge = BridgeBuilder::new(cfg)
            .with_topic_backend(Arc::clone(&topics) as Arc<dyn Backend>)
            .with_service_backend(Arc::clone(&services) as Arc<dyn Backend>)
            .with_action_backend(Arc::clone(&actions) as Arc<dyn Backend>)
            .build();
        bridge.start().await.unwrap();
        Fixture {
            bridge,
            topics,
            services,
        }
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    /// Polls until the condition holds or a generous deadline passes.
    async fn eventually<F, Fut>(check: F)
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        for _ in 0..200 {
            if check().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached in time");
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let f = fixture(BridgeConfig::default()).await;
        f.bridge
            .expose_topics(names(&["/a", "/b"]), true, true)
            .await;

        // Nothing resolvable yet: both parked.
        assert!(f.bridge.get_topic("/a").await.is_err());

        // "/a" appears on the bus and becomes resolvable.
        f.topics.set_type("/a", "T");
        f.bridge
            .watcher_handle()
            .submit(GraphBatch::appeared(Kind::Topic, names(&["/a"])))
            .await
            .unwrap();

        let bridge = Arc::clone(&f.bridge);
        eventually(|| {
            let bridge = Arc::clone(&bridge);
            async move { bridge.get_topic("a").await.is_ok() }
        })
        .await;
        let handle = f.bridge.get_topic("a").await.unwrap();
        assert_eq!(handle.type_name(), "T");
        assert!(f.bridge.get_topic("/b").await.is_err());

        // Re-expose only "/b": "/a" is destroyed (no pending data), "/b" retried.
        f.topics.set_type("/b", "U");
        f.bridge.expose_topics(names(&["/b"]), true, true).await;

        assert!(f.bridge.get_topic("/a").await.is_err());
        assert!(f.topics.handle("/a").unwrap().is_closed());
        assert_eq!(f.bridge.get_topic("/b").await.unwrap().type_name(), "U");
    }

    #[tokio::test]
    async fn test_initial_config_applied_on_start() {
        let topics = MockBackend::new();
        topics.set_type("/chatter", "std_msgs/String");
        let cfg = BridgeConfig {
            topics: vec!["/chatter".to_string(), "/cam/*".to_string()],
            ..BridgeConfig::default()
        };
        let bridge = BridgeBuilder::new(cfg)
            .with_topic_backend(Arc::clone(&topics) as Arc<dyn Backend>)
            .build();
        bridge.start().await.unwrap();

        assert!(bridge.get_topic("chatter").await.is_ok());

        // The pattern half admits later discoveries.
        topics.set_type("/cam/left", "sensor_msgs/Image");
        bridge
            .watcher_handle()
            .submit(GraphBatch::appeared(Kind::Topic, names(&["/cam/left"])))
            .await
            .unwrap();
        let bridge2 = Arc::clone(&bridge);
        eventually(|| {
            let bridge = Arc::clone(&bridge2);
            async move { bridge.get_topic("/cam/left").await.is_ok() }
        })
        .await;
    }

    #[tokio::test]
    async fn test_start_twice_is_an_error() {
        let f = fixture(BridgeConfig::default()).await;
        assert_eq!(
            f.bridge.start().await.unwrap_err(),
            BridgeError::AlreadyStarted
        );
    }

    #[tokio::test]
    async fn test_lookup_signals_are_unified_across_kinds() {
        let f = fixture(BridgeConfig::default()).await;

        let topic_err = f.bridge.get_topic("/nope").await.unwrap_err();
        let service_err = f.bridge.get_service("/nope").await.unwrap_err();
        let action_err = f.bridge.get_action("/nope").await.unwrap_err();

        for (err, kind) in [
            (topic_err, Kind::Topic),
            (service_err, Kind::Service),
            (action_err, Kind::Action),
        ] {
            assert_eq!(
                err,
                LookupError::NotExposed {
                    kind,
                    name: "/nope".to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_expose_flags_reach_the_factory() {
        let f = fixture(BridgeConfig::default()).await;
        f.topics.set_type("/a", "T");

        f.bridge.expose_topics(names(&["/a"]), false, true).await;

        let flags = f.topics.last_flags().unwrap();
        assert!(!flags.allow_publish);
        assert!(flags.allow_subscribe);
    }

    #[tokio::test]
    async fn test_reconfigure_returns_applied_copy() {
        let f = fixture(BridgeConfig::default()).await;
        f.services.set_type("/calc", "AddTwoInts");

        let update = DesiredUpdate {
            services: names(&["/calc", "/diag/*"]),
            ..DesiredUpdate::default()
        };
        let applied = f.bridge.reconfigure(update.clone()).await;

        assert_eq!(applied.services, update.services);
        assert!(f.bridge.get_service("/calc").await.is_ok());
        assert_eq!(f.bridge.service_names().await, vec!["calc".to_string()]);
    }

    #[tokio::test]
    async fn test_shutdown_closes_handles_and_watcher_queue() {
        let f = fixture(BridgeConfig::default()).await;
        f.topics.set_type("/a", "T");
        f.bridge.expose_topics(names(&["/a"]), true, true).await;
        let handle = f.bridge.watcher_handle();

        f.bridge.shutdown().await;

        assert!(f.topics.handle("/a").unwrap().is_closed());
        assert!(f.bridge.get_topic("/a").await.is_err());

        // The loop is gone; submissions eventually fail closed.
        let batch = GraphBatch::appeared(Kind::Topic, names(&["/late"]));
        eventually(|| {
            let handle = handle.clone();
            let batch = batch.clone();
            async move { handle.submit(batch).await.is_err() }
        })
        .await;
    }
}
