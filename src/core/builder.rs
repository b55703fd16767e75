//! # BridgeBuilder: assembles a bridge from config, backends and subscribers.
//!
//! Construction is infallible; kinds left without a wired backend fall back to
//! a null backend that never resolves, so their names simply park in waiting.
//! Call inside a Tokio runtime (subscriber workers are spawned at build time).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::backend::{Backend, ExposeFlags, HandleRef, Kind};
use crate::core::bridge::Bridge;
use crate::core::config::BridgeConfig;
use crate::core::reconciler::Reconciler;
use crate::error::ResolveError;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::watcher::GraphWatcher;

/// Fallback backend for kinds the caller did not wire.
///
/// Every name stays unresolvable, i.e. parked in waiting.
struct NullBackend;

#[async_trait]
impl Backend for NullBackend {
    async fn resolve(&self, _canonical: &str) -> Result<String, ResolveError> {
        Err(ResolveError::NotFound)
    }

    async fn construct(
        &self,
        _canonical: &str,
        _type_name: &str,
        _flags: ExposeFlags,
    ) -> Result<HandleRef, ResolveError> {
        Err(ResolveError::NotFound)
    }
}

/// Builder for constructing a [`Bridge`].
pub struct BridgeBuilder {
    cfg: BridgeConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    topics: Option<Arc<dyn Backend>>,
    services: Option<Arc<dyn Backend>>,
    actions: Option<Arc<dyn Backend>>,
}

impl BridgeBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BridgeConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            topics: None,
            services: None,
            actions: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive reconciliation events (exposures, parkings,
    /// deferred deletions, ...) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Wires the topic resolver/factory.
    pub fn with_topic_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.topics = Some(backend);
        self
    }

    /// Wires the service resolver/factory.
    pub fn with_service_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.services = Some(backend);
        self
    }

    /// Wires the action resolver/factory.
    pub fn with_action_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.actions = Some(backend);
        self
    }

    /// Builds and returns the bridge instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Per-kind reconcilers
    /// - Subscriber workers
    /// - Graph-watcher intake (the loop itself starts with `Bridge::start`)
    pub fn build(self) -> Arc<Bridge> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let runtime_token = CancellationToken::new();

        let null: Arc<dyn Backend> = Arc::new(NullBackend);
        let topics = Reconciler::new(
            Kind::Topic,
            self.topics.unwrap_or_else(|| Arc::clone(&null)),
            bus.clone(),
            self.cfg.topic_flags(),
        );
        let services = Reconciler::new(
            Kind::Service,
            self.services.unwrap_or_else(|| Arc::clone(&null)),
            bus.clone(),
            ExposeFlags::default(),
        );
        let actions = Reconciler::new(
            Kind::Action,
            self.actions.unwrap_or(null),
            bus.clone(),
            ExposeFlags::default(),
        );

        let watcher = GraphWatcher::new(
            self.cfg.watcher_queue_capacity_clamped(),
            bus.clone(),
            Arc::clone(&topics),
            Arc::clone(&services),
            Arc::clone(&actions),
        );

        Arc::new(Bridge::new_internal(
            self.cfg,
            bus,
            subs,
            topics,
            services,
            actions,
            watcher,
            runtime_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unwired_backend_parks_everything() {
        let bridge = BridgeBuilder::new(BridgeConfig::default()).build();
        bridge.start().await.unwrap();

        bridge.expose_services(vec!["/calc".to_string()]).await;

        assert!(bridge.get_service("/calc").await.is_err());
    }
}
