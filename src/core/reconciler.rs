//! # Per-kind reconciler - desired-vs-actual state resolution.
//!
//! One [`Reconciler`] instance exists per resource kind (topics, services,
//! actions). It owns that kind's tracking collections and applies add/remove
//! operations driven by configuration changes and watcher events:
//! - `expose(names)` → full reconciliation against the stored desired list
//! - `on_graph_event(appeared, vanished)` → waiting retries, pattern
//!   admission, desired-name removal, deferred-deletion purging
//! - `reconfigure(raw)` → pattern/name partition, then `expose`
//!
//! ## State machine
//! ```text
//! services/actions:  Waiting ──► Exposed ──► (closed)
//! topics:            Waiting ──► Exposed ──► PendingDeletion ──► (purged)
//!                                   │   pending_unread() == 0   ▲
//!                                   └─────────► (closed)        │ drained,
//!                                                               │ next watcher pass
//! ```
//!
//! ## Rules
//! - A canonical name lives in at most one of {exposed, waiting, deferred}.
//! - All collections sit behind one lock; every operation runs to completion
//!   under it (backend calls included - they are opaque, caller-timed).
//! - Backend failures park the name in waiting and never propagate; each name
//!   in a batch reconciles independently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::{local_name, Backend, ExposeFlags, HandleRef, Kind};
use crate::error::{LookupError, ReconcileError, ResolveError};
use crate::events::{Bus, Event, EventKind};
use crate::patterns::{is_pattern, PatternSet};

/// Live entry in the actual-state map.
struct ExposedEntry {
    /// Canonical, fully-qualified bus name.
    canonical: String,
    /// Live backend handle.
    handle: HandleRef,
}

/// Tracking collections of one kind, all behind the reconciler's single lock.
struct KindState {
    /// Actual state: local (alias) name → live entry.
    exposed: HashMap<String, ExposedEntry>,
    /// Canonical names desired or discovered but not yet resolvable.
    waiting: HashSet<String>,
    /// Topics awaiting drain before final removal: local name → retained handle.
    deferred: HashMap<String, HandleRef>,
    /// Most recently applied explicit desired list (canonical names).
    desired: Vec<String>,
    /// Accumulated admission patterns.
    patterns: PatternSet,
}

impl KindState {
    fn new() -> Self {
        Self {
            exposed: HashMap::new(),
            waiting: HashSet::new(),
            deferred: HashMap::new(),
            desired: Vec::new(),
            patterns: PatternSet::new(),
        }
    }
}

/// Reconciles one resource kind's exposed set against desired state and live
/// bus membership.
pub(crate) struct Reconciler {
    kind: Kind,
    backend: Arc<dyn Backend>,
    bus: Bus,
    /// Flags used for watcher-driven admissions and reconfiguration passes.
    default_flags: ExposeFlags,
    state: RwLock<KindState>,
}

impl Reconciler {
    /// Creates a reconciler for one kind.
    pub(crate) fn new(
        kind: Kind,
        backend: Arc<dyn Backend>,
        bus: Bus,
        default_flags: ExposeFlags,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            backend,
            bus,
            default_flags,
            state: RwLock::new(KindState::new()),
        })
    }

    /// Full reconciliation pass against the stored desired list.
    ///
    /// No-op when `names` is empty (an empty call must not clear previously
    /// desired state) or identical to the stored list (idempotence). Otherwise
    /// every incoming name that is new relative to the stored list - or still
    /// parked in waiting - is resolve-and-added; stored names absent from the
    /// incoming list are removed; the stored list is replaced.
    pub(crate) async fn expose(&self, names: Vec<String>, flags: ExposeFlags) {
        if names.is_empty() {
            return;
        }
        let mut st = self.state.write().await;
        if names == st.desired {
            return;
        }

        let mut added = 0usize;
        for name in &names {
            if !st.desired.contains(name) || st.waiting.contains(name) {
                self.add_locked(&mut st, name, flags).await;
                added += 1;
            }
        }

        let stale: Vec<String> = st
            .desired
            .iter()
            .filter(|d| !names.contains(*d))
            .cloned()
            .collect();
        let removed = stale.len();
        for name in &stale {
            self.remove_or_report(&mut st, name);
        }

        st.desired = names;
        self.bus.publish(
            Event::now(EventKind::ExposeApplied)
                .with_kind(self.kind)
                .with_counts(added, removed),
        );
    }

    /// Membership change delivered by the graph watcher.
    ///
    /// Appeared names already in waiting, or matching a stored pattern, are
    /// admitted with the kind's default flags. Vanished names are removed only
    /// if explicitly desired. Topics additionally purge drained deferred
    /// entries on every invocation.
    pub(crate) async fn on_graph_event(&self, appeared: Vec<String>, vanished: Vec<String>) {
        let mut st = self.state.write().await;

        for name in &appeared {
            if st.waiting.contains(name) || st.patterns.matches(name) {
                self.add_locked(&mut st, name, self.default_flags).await;
            }
        }

        for name in &vanished {
            if st.desired.contains(name) {
                self.remove_or_report(&mut st, name);
            }
        }

        if self.kind.defers_deletion() {
            self.purge_drained(&mut st);
        }
    }

    /// Partitions a raw operator-declared list into admission patterns and
    /// plain names, then runs `expose` over the plain names.
    ///
    /// Patterns accumulate: nothing is ever removed by this path, and plain
    /// names string-equal to a stored pattern are skipped.
    pub(crate) async fn reconfigure(&self, raw: Vec<String>, flags: ExposeFlags) {
        let mut plain = Vec::new();
        {
            let mut st = self.state.write().await;
            let mut new_patterns = 0usize;
            for name in raw {
                if is_pattern(&name) {
                    if st.patterns.insert(&name) {
                        new_patterns += 1;
                    }
                } else if !st.patterns.contains(&name) {
                    plain.push(name);
                }
            }
            self.bus.publish(
                Event::now(EventKind::ReconfigureApplied)
                    .with_kind(self.kind)
                    .with_counts(new_patterns, 0),
            );
        }
        self.expose(plain, flags).await;
    }

    /// Resolve-and-add one canonical name. Test seam.
    ///
    /// Returns `true` if the name ended up exposed.
    #[cfg(test)]
    pub(crate) async fn add(&self, canonical: &str, flags: ExposeFlags) -> bool {
        let mut st = self.state.write().await;
        self.add_locked(&mut st, canonical, flags).await
    }

    /// Removes one canonical name from whichever collection tracks it. Test
    /// seam.
    #[cfg(test)]
    pub(crate) async fn remove(&self, canonical: &str) -> Result<(), ReconcileError> {
        let mut st = self.state.write().await;
        self.remove_locked(&mut st, canonical)
    }

    /// Returns the live handle for an exposed name.
    ///
    /// Accepts canonical (`/chatter`) or local (`chatter`) form. For topics a
    /// deferred handle is still returned while it reports pending unread data
    /// (graceful drain); once drained it is no longer retrievable.
    pub(crate) async fn lookup(&self, name: &str) -> Result<HandleRef, LookupError> {
        let local = local_name(name);
        let st = self.state.read().await;

        if let Some(entry) = st.exposed.get(local) {
            return Ok(Arc::clone(&entry.handle));
        }
        if self.kind.defers_deletion() {
            if let Some(handle) = st.deferred.get(local) {
                if handle.pending_unread() > 0 {
                    return Ok(Arc::clone(handle));
                }
            }
        }
        Err(LookupError::NotExposed {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    /// Returns sorted local names of currently exposed resources.
    pub(crate) async fn list(&self) -> Vec<String> {
        let st = self.state.read().await;
        let mut names: Vec<String> = st.exposed.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Canonical names currently parked in waiting (sorted). Test seam.
    #[cfg(test)]
    pub(crate) async fn waiting(&self) -> Vec<String> {
        let st = self.state.read().await;
        let mut names: Vec<String> = st.waiting.iter().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Closes every exposed and deferred handle and clears the waiting set.
    ///
    /// Bridge shutdown path.
    pub(crate) async fn close_all(&self) {
        let mut st = self.state.write().await;
        for (_, entry) in st.exposed.drain() {
            entry.handle.close();
        }
        for (_, handle) in st.deferred.drain() {
            handle.close();
        }
        st.waiting.clear();
    }

    // ---------------------------
    // Locked helpers
    // ---------------------------

    /// Resolve-and-add under the write lock.
    ///
    /// Failure parks the name in waiting (unless the same local name is still
    /// exposed or deferred - a failed replace keeps the prior entry) and
    /// publishes a warning-grade `Parked` event. Success overwrites any
    /// identically-named prior entry and evicts a stale deferred copy.
    async fn add_locked(&self, st: &mut KindState, canonical: &str, flags: ExposeFlags) -> bool {
        let outcome = self.resolve_and_construct(canonical, flags).await;
        let (type_name, handle) = match outcome {
            Ok(pair) => pair,
            Err(err) => {
                let local = local_name(canonical);
                if !st.exposed.contains_key(local) && !st.deferred.contains_key(local) {
                    st.waiting.insert(canonical.to_string());
                }
                self.bus.publish(
                    Event::now(EventKind::Parked)
                        .with_kind(self.kind)
                        .with_resource(canonical)
                        .with_reason(err.as_label()),
                );
                return false;
            }
        };

        let local = local_name(canonical).to_string();
        st.waiting.remove(canonical);
        if let Some(stale) = st.deferred.remove(&local) {
            // Re-adding discards the old homonym's undrained data.
            stale.close();
        }
        let entry = ExposedEntry {
            canonical: canonical.to_string(),
            handle,
        };
        if let Some(prev) = st.exposed.insert(local, entry) {
            prev.handle.close();
        }
        self.bus.publish(
            Event::now(EventKind::Exposed)
                .with_kind(self.kind)
                .with_resource(canonical)
                .with_type(type_name),
        );
        true
    }

    /// Backend round-trips for one add, isolated from state mutation.
    async fn resolve_and_construct(
        &self,
        canonical: &str,
        flags: ExposeFlags,
    ) -> Result<(String, HandleRef), ResolveError> {
        let type_name = self.backend.resolve(canonical).await?;
        let handle = self.backend.construct(canonical, &type_name, flags).await?;
        Ok((type_name, handle))
    }

    /// Remove under the write lock.
    ///
    /// Exposed topics with pending unread data are moved to deferred deletion;
    /// everything else is destroyed immediately. A name tracked nowhere is a
    /// typed `NotTracked` error.
    fn remove_locked(&self, st: &mut KindState, canonical: &str) -> Result<(), ReconcileError> {
        let local = local_name(canonical).to_string();

        if let Some(entry) = st.exposed.remove(&local) {
            let pending = entry.handle.pending_unread();
            if self.kind.defers_deletion() && pending > 0 {
                self.bus.publish(
                    Event::now(EventKind::Deferred)
                        .with_kind(self.kind)
                        .with_resource(entry.canonical)
                        .with_pending(pending),
                );
                st.deferred.insert(local, entry.handle);
            } else {
                entry.handle.close();
                self.bus.publish(
                    Event::now(EventKind::Removed)
                        .with_kind(self.kind)
                        .with_resource(entry.canonical),
                );
            }
            return Ok(());
        }

        if st.waiting.remove(canonical) {
            self.bus.publish(
                Event::now(EventKind::Removed)
                    .with_kind(self.kind)
                    .with_resource(canonical),
            );
            return Ok(());
        }

        if let Some(handle) = st.deferred.remove(&local) {
            handle.close();
            self.bus.publish(
                Event::now(EventKind::Purged)
                    .with_kind(self.kind)
                    .with_resource(local),
            );
            return Ok(());
        }

        Err(ReconcileError::NotTracked {
            kind: self.kind,
            name: canonical.to_string(),
        })
    }

    /// Remove with the `NotTracked` case downgraded to a warning event.
    ///
    /// Batch passes (expose, watcher) isolate failures per name.
    fn remove_or_report(&self, st: &mut KindState, canonical: &str) {
        if let Err(ReconcileError::NotTracked { .. }) = self.remove_locked(st, canonical) {
            self.bus.publish(
                Event::now(EventKind::RemoveMissed)
                    .with_kind(self.kind)
                    .with_resource(canonical),
            );
        }
    }

    /// Purges deferred entries whose pending count reached zero.
    fn purge_drained(&self, st: &mut KindState) {
        let drained: Vec<String> = st
            .deferred
            .iter()
            .filter(|(_, handle)| handle.pending_unread() == 0)
            .map(|(local, _)| local.clone())
            .collect();
        for local in drained {
            if let Some(handle) = st.deferred.remove(&local) {
                handle.close();
                self.bus.publish(
                    Event::now(EventKind::Purged)
                        .with_kind(self.kind)
                        .with_resource(local),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::MockBackend;

    fn reconciler(kind: Kind, backend: &Arc<MockBackend>) -> Arc<Reconciler> {
        Reconciler::new(
            kind,
            Arc::clone(backend) as Arc<dyn Backend>,
            Bus::new(64),
            ExposeFlags::default(),
        )
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_expose_resolves_and_exposes() {
        let backend = MockBackend::new();
        backend.set_type("/a", "std_msgs/String");
        let rec = reconciler(Kind::Topic, &backend);

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;

        let handle = rec.lookup("/a").await.unwrap();
        assert_eq!(handle.type_name(), "std_msgs/String");
        // Local alias resolves too.
        assert!(rec.lookup("a").await.is_ok());
        assert_eq!(rec.list().await, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_expose_unresolvable_parks_in_waiting() {
        let backend = MockBackend::new();
        let rec = reconciler(Kind::Service, &backend);

        rec.expose(names(&["/calc"]), ExposeFlags::default()).await;

        assert!(rec.lookup("/calc").await.is_err());
        assert_eq!(rec.waiting().await, vec!["/calc".to_string()]);
    }

    #[tokio::test]
    async fn test_expose_identical_list_is_a_no_op() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;
        let calls_after_first = backend.resolve_calls();

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;
        assert_eq!(backend.resolve_calls(), calls_after_first);
        assert!(rec.lookup("/a").await.is_ok());
    }

    #[tokio::test]
    async fn test_expose_empty_list_does_not_clear() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Action, &backend);

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;
        rec.expose(Vec::new(), ExposeFlags::default()).await;

        assert!(rec.lookup("/a").await.is_ok());
    }

    #[tokio::test]
    async fn test_expose_converges_to_new_list() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        backend.set_type("/b", "U");
        let rec = reconciler(Kind::Service, &backend);

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;
        rec.expose(names(&["/b"]), ExposeFlags::default()).await;

        assert!(rec.lookup("/a").await.is_err());
        assert!(rec.lookup("/b").await.is_ok());
        assert!(backend.handle("/a").unwrap().is_closed());
    }

    #[tokio::test]
    async fn test_expose_batch_isolates_failures() {
        let backend = MockBackend::new();
        backend.set_type("/ok", "T");
        let rec = reconciler(Kind::Service, &backend);

        rec.expose(names(&["/broken", "/ok"]), ExposeFlags::default())
            .await;

        assert!(rec.lookup("/ok").await.is_ok());
        assert_eq!(rec.waiting().await, vec!["/broken".to_string()]);
    }

    #[tokio::test]
    async fn test_readd_replaces_and_closes_prior_handle() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        assert!(rec.add("/a", ExposeFlags::default()).await);
        let first = backend.handle("/a").unwrap();
        assert!(rec.add("/a", ExposeFlags::default()).await);

        assert!(first.is_closed());
        assert!(rec.lookup("/a").await.is_ok());
    }

    #[tokio::test]
    async fn test_waiting_retry_via_graph_event() {
        let backend = MockBackend::new();
        let rec = reconciler(Kind::Topic, &backend);

        rec.expose(names(&["/x"]), ExposeFlags::default()).await;
        assert_eq!(rec.waiting().await, vec!["/x".to_string()]);

        backend.set_type("/x", "T");
        rec.on_graph_event(names(&["/x"]), Vec::new()).await;

        assert!(rec.lookup("/x").await.is_ok());
        assert!(rec.waiting().await.is_empty());
    }

    #[tokio::test]
    async fn test_pattern_admission_without_expose() {
        let backend = MockBackend::new();
        backend.set_type("/foo/bar", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.reconfigure(names(&["/foo/*"]), ExposeFlags::default())
            .await;
        rec.on_graph_event(names(&["/foo/bar"]), Vec::new()).await;

        assert!(rec.lookup("/foo/bar").await.is_ok());
    }

    #[tokio::test]
    async fn test_unmatched_appearance_is_ignored() {
        let backend = MockBackend::new();
        backend.set_type("/noise", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.on_graph_event(names(&["/noise"]), Vec::new()).await;

        assert!(rec.lookup("/noise").await.is_err());
        assert_eq!(backend.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn test_vanished_desired_name_is_removed() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Service, &backend);

        rec.expose(names(&["/a"]), ExposeFlags::default()).await;
        rec.on_graph_event(Vec::new(), names(&["/a"])).await;

        assert!(rec.lookup("/a").await.is_err());
    }

    #[tokio::test]
    async fn test_deferred_deletion_keeps_draining_topic_retrievable() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        backend.handle("/a").unwrap().set_pending(3);

        rec.remove("/a").await.unwrap();

        // Still readable while draining.
        let handle = rec.lookup("/a").await.unwrap();
        assert_eq!(handle.pending_unread(), 3);
        assert!(!backend.handle("/a").unwrap().is_closed());
        // No longer listed as exposed.
        assert!(rec.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_drained_topic_purged_on_next_watcher_pass() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        backend.handle("/a").unwrap().set_pending(2);
        rec.remove("/a").await.unwrap();

        // Not drained yet: the watcher pass keeps it.
        rec.on_graph_event(Vec::new(), Vec::new()).await;
        assert!(rec.lookup("/a").await.is_ok());

        backend.handle("/a").unwrap().set_pending(0);
        rec.on_graph_event(Vec::new(), Vec::new()).await;

        assert!(rec.lookup("/a").await.is_err());
        assert!(backend.handle("/a").unwrap().is_closed());
    }

    #[tokio::test]
    async fn test_services_never_defer() {
        let backend = MockBackend::new();
        backend.set_type("/svc", "T");
        let rec = reconciler(Kind::Service, &backend);

        rec.add("/svc", ExposeFlags::default()).await;
        backend.handle("/svc").unwrap().set_pending(5);

        rec.remove("/svc").await.unwrap();

        assert!(rec.lookup("/svc").await.is_err());
        assert!(backend.handle("/svc").unwrap().is_closed());
    }

    #[tokio::test]
    async fn test_readd_evicts_stale_deferred_copy() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        let first = backend.handle("/a").unwrap();
        first.set_pending(4);
        rec.remove("/a").await.unwrap();

        // Re-adding discards the undrained copy.
        rec.add("/a", ExposeFlags::default()).await;
        assert!(first.is_closed());
        let current = rec.lookup("/a").await.unwrap();
        assert_eq!(current.pending_unread(), 0);
    }

    #[tokio::test]
    async fn test_remove_untracked_is_typed_error() {
        let backend = MockBackend::new();
        let rec = reconciler(Kind::Action, &backend);

        let err = rec.remove("/ghost").await.unwrap_err();
        assert_eq!(
            err,
            ReconcileError::NotTracked {
                kind: Kind::Action,
                name: "/ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_remove_waiting_only_drops_from_waiting() {
        let backend = MockBackend::new();
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/x", ExposeFlags::default()).await;
        assert_eq!(rec.waiting().await, vec!["/x".to_string()]);

        rec.remove("/x").await.unwrap();
        assert!(rec.waiting().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_deferred_only_purges_outright() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        backend.handle("/a").unwrap().set_pending(1);
        rec.remove("/a").await.unwrap();

        // Second remove hits the deferred map and destroys it.
        rec.remove("/a").await.unwrap();
        assert!(rec.lookup("/a").await.is_err());
        assert!(backend.handle("/a").unwrap().is_closed());
    }

    #[tokio::test]
    async fn test_construct_failure_parks_like_resolution_failure() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        backend.fail_construct("/a");
        let rec = reconciler(Kind::Topic, &backend);

        assert!(!rec.add("/a", ExposeFlags::default()).await);
        assert_eq!(rec.waiting().await, vec!["/a".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_prior_entry_out_of_waiting() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        backend.clear_type("/a");
        assert!(!rec.add("/a", ExposeFlags::default()).await);

        // The prior handle stays exposed; the name is not double-tracked.
        assert!(rec.lookup("/a").await.is_ok());
        assert!(rec.waiting().await.is_empty());
    }

    #[tokio::test]
    async fn test_reexpose_retries_parked_names() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.expose(names(&["/a", "/b"]), ExposeFlags::default()).await;
        assert_eq!(rec.waiting().await, vec!["/b".to_string()]);

        backend.set_type("/b", "U");
        rec.expose(names(&["/b"]), ExposeFlags::default()).await;

        assert!(rec.lookup("/a").await.is_err());
        let handle = rec.lookup("/b").await.unwrap();
        assert_eq!(handle.type_name(), "U");
    }

    #[tokio::test]
    async fn test_reconfigure_accumulates_patterns() {
        let backend = MockBackend::new();
        backend.set_type("/foo/one", "T");
        backend.set_type("/bar/two", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.reconfigure(names(&["/foo/*"]), ExposeFlags::default())
            .await;
        // New configuration omits the old pattern; it must survive.
        rec.reconfigure(names(&["/bar/*"]), ExposeFlags::default())
            .await;

        rec.on_graph_event(names(&["/foo/one", "/bar/two"]), Vec::new())
            .await;
        assert!(rec.lookup("/foo/one").await.is_ok());
        assert!(rec.lookup("/bar/two").await.is_ok());
    }

    #[tokio::test]
    async fn test_reconfigure_ignores_duplicate_patterns() {
        let backend = MockBackend::new();
        let rec = reconciler(Kind::Service, &backend);

        rec.reconfigure(names(&["/svc/*"]), ExposeFlags::default())
            .await;
        // Redelivered pattern strings never reach the expose path.
        rec.reconfigure(names(&["/svc/*"]), ExposeFlags::default())
            .await;

        assert_eq!(backend.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn test_close_all_closes_everything() {
        let backend = MockBackend::new();
        backend.set_type("/a", "T");
        backend.set_type("/b", "T");
        let rec = reconciler(Kind::Topic, &backend);

        rec.add("/a", ExposeFlags::default()).await;
        rec.add("/b", ExposeFlags::default()).await;
        backend.handle("/b").unwrap().set_pending(2);
        rec.remove("/b").await.unwrap();

        rec.close_all().await;

        assert!(backend.handle("/a").unwrap().is_closed());
        assert!(backend.handle("/b").unwrap().is_closed());
        assert!(rec.list().await.is_empty());
    }
}
