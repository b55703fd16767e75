//! Hand-rolled backend fixture shared by the core tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{Backend, ExposeFlags, Handle, HandleRef};
use crate::error::ResolveError;

/// Inspectable in-memory handle.
pub(crate) struct MockHandle {
    canonical: String,
    type_name: String,
    pending: AtomicUsize,
    closed: AtomicBool,
}

impl MockHandle {
    pub(crate) fn set_pending(&self, n: usize) {
        self.pending.store(n, Ordering::SeqCst);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Handle for MockHandle {
    fn canonical_name(&self) -> &str {
        &self.canonical
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn pending_unread(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// In-memory resolver/factory with a mutable type table.
///
/// `handle(name)` returns the most recently constructed handle for a name so
/// tests can drive pending counts and observe closes.
pub(crate) struct MockBackend {
    types: Mutex<HashMap<String, String>>,
    handles: Mutex<HashMap<String, Arc<MockHandle>>>,
    construct_failures: Mutex<HashSet<String>>,
    resolve_calls: AtomicUsize,
    last_flags: Mutex<Option<ExposeFlags>>,
}

impl MockBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            types: Mutex::new(HashMap::new()),
            handles: Mutex::new(HashMap::new()),
            construct_failures: Mutex::new(HashSet::new()),
            resolve_calls: AtomicUsize::new(0),
            last_flags: Mutex::new(None),
        })
    }

    /// Makes `name` resolvable to `type_name`.
    pub(crate) fn set_type(&self, name: &str, type_name: &str) {
        self.types
            .lock()
            .unwrap()
            .insert(name.to_string(), type_name.to_string());
    }

    /// Makes `name` unresolvable again.
    pub(crate) fn clear_type(&self, name: &str) {
        self.types.lock().unwrap().remove(name);
    }

    /// Makes `construct` fail for `name` even when it resolves.
    pub(crate) fn fail_construct(&self, name: &str) {
        self.construct_failures
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    /// Number of `resolve` calls seen so far.
    pub(crate) fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Most recently constructed handle for `name`.
    pub(crate) fn handle(&self, name: &str) -> Option<Arc<MockHandle>> {
        self.handles.lock().unwrap().get(name).cloned()
    }

    /// Flags passed to the most recent `construct` call.
    pub(crate) fn last_flags(&self) -> Option<ExposeFlags> {
        *self.last_flags.lock().unwrap()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn resolve(&self, canonical: &str) -> Result<String, ResolveError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.types
            .lock()
            .unwrap()
            .get(canonical)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }

    async fn construct(
        &self,
        canonical: &str,
        type_name: &str,
        flags: ExposeFlags,
    ) -> Result<HandleRef, ResolveError> {
        if self.construct_failures.lock().unwrap().contains(canonical) {
            return Err(ResolveError::Transport {
                reason: "construct refused".to_string(),
            });
        }
        *self.last_flags.lock().unwrap() = Some(flags);
        let handle = Arc::new(MockHandle {
            canonical: canonical.to_string(),
            type_name: type_name.to_string(),
            pending: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        });
        self.handles
            .lock()
            .unwrap()
            .insert(canonical.to_string(), Arc::clone(&handle));
        Ok(handle)
    }
}
