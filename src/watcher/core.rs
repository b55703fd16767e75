use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

use crate::backend::Kind;
use crate::core::Reconciler;
use crate::events::{Bus, Event, EventKind};

use super::{batch::GraphBatch, error::SubmitError};

/// Handle for pushing membership batches into the watcher loop.
#[derive(Clone)]
pub struct WatcherHandle {
    tx: mpsc::Sender<GraphBatch>,
}

impl WatcherHandle {
    /// Submit a batch (async, waits if the queue is full).
    pub async fn submit(&self, batch: GraphBatch) -> Result<(), SubmitError> {
        self.tx.send(batch).await.map_err(|_| SubmitError::Closed)
    }

    /// Try to submit without blocking (fails if the queue is full).
    pub fn try_submit(&self, batch: GraphBatch) -> Result<(), SubmitError> {
        self.tx.try_send(batch).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

/// Dispatches membership batches to the per-kind reconcilers.
///
/// Owned by the bridge; the loop runs until the bridge's runtime token is
/// cancelled.
pub(crate) struct GraphWatcher {
    bus: Bus,
    topics: Arc<Reconciler>,
    services: Arc<Reconciler>,
    actions: Arc<Reconciler>,

    // Intake queue.
    tx: mpsc::Sender<GraphBatch>,
    rx: RwLock<Option<mpsc::Receiver<GraphBatch>>>,
}

impl GraphWatcher {
    /// Creates a new watcher (must call `.run()` to start).
    pub(crate) fn new(
        queue_capacity: usize,
        bus: Bus,
        topics: Arc<Reconciler>,
        services: Arc<Reconciler>,
        actions: Arc<Reconciler>,
    ) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));

        Arc::new(Self {
            bus,
            topics,
            services,
            actions,
            tx,
            rx: RwLock::new(Some(rx)),
        })
    }

    /// Returns a handle for submitting batches.
    pub(crate) fn handle(&self) -> WatcherHandle {
        WatcherHandle {
            tx: self.tx.clone(),
        }
    }

    /// Starts the watcher loop (spawns in background).
    pub(crate) fn run(self: Arc<Self>, token: CancellationToken) {
        tokio::spawn(async move {
            if let Err(e) = self.run_inner(token).await {
                eprintln!("[busvisor] watcher error: {e:?}");
            }
        });
    }

    async fn run_inner(&self, token: CancellationToken) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .write()
            .await
            .take()
            .ok_or_else(|| anyhow::anyhow!("watcher already running"))?;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,

                batch = rx.recv() => match batch {
                    Some(batch) => self.dispatch(batch).await,
                    None => break,
                }
            }
        }

        Ok(())
    }

    /// Forwards one batch to its kind's reconciler.
    async fn dispatch(&self, batch: GraphBatch) {
        self.bus.publish(
            Event::now(EventKind::WatcherBatch)
                .with_kind(batch.kind)
                .with_counts(batch.appeared.len(), batch.vanished.len()),
        );

        let reconciler = match batch.kind {
            Kind::Topic => &self.topics,
            Kind::Service => &self.services,
            Kind::Action => &self.actions,
        };
        reconciler.on_graph_event(batch.appeared, batch.vanished).await;
    }
}
