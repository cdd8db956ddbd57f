//! Session-wide cache of loaded view modules.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, Shared};
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::ViewRef;
use crate::view::loader::ViewLoadError;
use crate::view::source::ViewModule;

/// A single in-flight load, shared by every caller that asks for the same view.
pub(crate) type PendingLoad = Shared<BoxFuture<'static, Result<Arc<ViewModule>, ViewLoadError>>>;

#[derive(Clone)]
pub(crate) enum CacheEntry {
    Pending(PendingLoad),
    Resolved(Arc<ViewModule>),
}

/// What `begin_or_join` found (or started) for a view.
pub(crate) enum Lookup {
    Resolved(Arc<ViewModule>),
    Pending { load: PendingLoad, started: bool },
}

/// Maps each view reference to a pending load or a resolved module.
///
/// Entries are never evicted. Only the lazy loader mutates the cache, and the
/// only transitions are vacant → pending, pending → resolved and
/// pending → vacant (failed load).
#[derive(Clone, Default)]
pub struct LoadedViewCache {
    inner: Arc<DashMap<ViewRef, CacheEntry>>,
}

impl LoadedViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the resolved module or the pending load for `view`, starting a
    /// new load with `start` if there is neither.
    pub(crate) fn begin_or_join(&self, view: &ViewRef, start: impl FnOnce() -> PendingLoad) -> Lookup {
        match self.inner.entry(view.clone()) {
            Entry::Occupied(entry) => match entry.get() {
                CacheEntry::Resolved(module) => Lookup::Resolved(module.clone()),
                CacheEntry::Pending(load) => Lookup::Pending {
                    load: load.clone(),
                    started: false,
                },
            },
            Entry::Vacant(entry) => {
                let load = start();
                entry.insert(CacheEntry::Pending(load.clone()));
                Lookup::Pending { load, started: true }
            }
        }
    }

    /// Pending → resolved. Applying it twice with the same module is harmless.
    pub(crate) fn resolve(&self, view: ViewRef, module: Arc<ViewModule>) {
        self.inner.insert(view, CacheEntry::Resolved(module));
        metrics::record_view_cache_size(self.resolved_count());
    }

    /// Pending → vacant, so the next load retries. Resolved entries are kept.
    pub(crate) fn clear_pending(&self, view: &ViewRef) {
        self.inner
            .remove_if(view, |_, entry| matches!(entry, CacheEntry::Pending(_)));
    }

    /// Get the resolved module without starting a load.
    pub fn get(&self, view: &ViewRef) -> Option<Arc<ViewModule>> {
        match self.inner.get(view).as_deref() {
            Some(CacheEntry::Resolved(module)) => Some(module.clone()),
            _ => None,
        }
    }

    pub fn is_resolved(&self, view: &ViewRef) -> bool {
        matches!(self.inner.get(view).as_deref(), Some(CacheEntry::Resolved(_)))
    }

    pub fn is_pending(&self, view: &ViewRef) -> bool {
        matches!(self.inner.get(view).as_deref(), Some(CacheEntry::Pending(_)))
    }

    /// Number of modules loaded this session.
    pub fn resolved_count(&self) -> usize {
        self.inner
            .iter()
            .filter(|r| matches!(r.value(), CacheEntry::Resolved(_)))
            .count()
    }

    /// Resolved view references, sorted.
    pub fn resolved_views(&self) -> Vec<ViewRef> {
        let mut views: Vec<_> = self
            .inner
            .iter()
            .filter(|r| matches!(r.value(), CacheEntry::Resolved(_)))
            .map(|r| r.key().clone())
            .collect();
        views.sort();
        views
    }
}
