//! Lazy view loading with per-view deduplication.
//!
//! # Responsibilities
//! - Turn a `ViewRef` into a loaded module on demand
//! - Share one in-flight fetch among all concurrent callers
//! - Cache successful loads for the session, never failures
//!
//! # Design Decisions
//! - The fetch runs in its own task: dropping every waiter does not abort it,
//!   and it still fills the cache when it completes
//! - A failed fetch clears the pending entry so the next load retries
//! - Requires a running Tokio runtime

use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics;
use crate::routing::ViewRef;
use crate::view::cache::{LoadedViewCache, Lookup, PendingLoad};
use crate::view::source::{ModuleFetchError, ModuleSource, ViewModule};

/// A view module could not be loaded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load view '{view}': {cause}")]
pub struct ViewLoadError {
    pub view: ViewRef,
    #[source]
    pub cause: Arc<ModuleFetchError>,
}

impl ViewLoadError {
    pub fn new(view: ViewRef, cause: ModuleFetchError) -> Self {
        Self {
            view,
            cause: Arc::new(cause),
        }
    }
}

/// Loads view modules through a `ModuleSource`, deduplicating and caching.
#[derive(Clone)]
pub struct LazyViewLoader {
    source: Arc<dyn ModuleSource>,
    cache: LoadedViewCache,
}

impl LazyViewLoader {
    pub fn new(source: Arc<dyn ModuleSource>) -> Self {
        Self {
            source,
            cache: LoadedViewCache::new(),
        }
    }

    pub fn cache(&self) -> &LoadedViewCache {
        &self.cache
    }

    /// Load a view module.
    ///
    /// Returns immediately for a cached module. Otherwise joins the pending
    /// load for `view`, starting one if none is in flight.
    pub async fn load(&self, view: &ViewRef) -> Result<Arc<ViewModule>, ViewLoadError> {
        match self.cache.begin_or_join(view, || self.spawn_fetch(view.clone())) {
            Lookup::Resolved(module) => {
                metrics::record_view_cache_hit();
                Ok(module)
            }
            Lookup::Pending { load, started } => {
                if !started {
                    tracing::debug!(view = %view, "Joining in-flight view load");
                }
                load.await
            }
        }
    }

    /// Start loading `view` in the background if it is neither cached nor pending.
    pub fn prefetch(&self, view: &ViewRef) {
        if let Lookup::Pending { started: true, .. } =
            self.cache.begin_or_join(view, || self.spawn_fetch(view.clone()))
        {
            tracing::debug!(view = %view, "View prefetch started");
        }
    }

    fn spawn_fetch(&self, view: ViewRef) -> PendingLoad {
        let source = self.source.clone();
        let cache = self.cache.clone();
        let task_view = view.clone();

        tracing::debug!(view = %view, "Fetching view module");

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            match source.load_module(&task_view).await {
                Ok(module) => {
                    let module = Arc::new(module);
                    cache.resolve(task_view.clone(), module.clone());
                    metrics::record_view_load("ok", started);
                    let elapsed = started.elapsed();
                    tracing::info!(view = %task_view, elapsed = ?elapsed, "View module loaded");
                    Ok(module)
                }
                Err(e) => {
                    cache.clear_pending(&task_view);
                    metrics::record_view_load("error", started);
                    tracing::warn!(view = %task_view, error = %e, "View module load failed");
                    Err(ViewLoadError::new(task_view, e))
                }
            }
        });

        let cache = self.cache.clone();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    cache.clear_pending(&view);
                    Err(ViewLoadError::new(
                        view,
                        ModuleFetchError::Other(format!("load task failed: {join_error}")),
                    ))
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails the first `failures` fetches, then succeeds.
    struct FlakySource {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl ModuleSource for FlakySource {
        async fn load_module(&self, view: &ViewRef) -> Result<ViewModule, ModuleFetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if call < self.failures {
                Err(ModuleFetchError::Other("network down".into()))
            } else {
                Ok(ViewModule::new(view.clone(), format!("module #{call}")))
            }
        }
    }

    #[tokio::test]
    async fn test_cached_module_returned_without_refetch() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
            failures: 0,
        });
        let loader = LazyViewLoader::new(source.clone());
        let view = ViewRef::new("home/index.vue");

        let first = loader.load(&view).await.unwrap();
        let second = loader.load(&view).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(loader.cache().is_resolved(&view));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
            failures: 1,
        });
        let loader = LazyViewLoader::new(source.clone());
        let view = ViewRef::new("home/index.vue");

        let err = loader.load(&view).await.unwrap_err();
        assert_eq!(err.view, view);
        assert!(err.to_string().contains("network down"));
        assert!(!loader.cache().is_pending(&view));
        assert!(!loader.cache().is_resolved(&view));

        let module = loader.load(&view).await.unwrap();
        assert_eq!(module.body, "module #1");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_prefetch_fills_cache() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
            failures: 0,
        });
        let loader = LazyViewLoader::new(source.clone());
        let view = ViewRef::new("about/index.vue");

        loader.prefetch(&view);
        assert!(loader.cache().is_pending(&view));
        loader.prefetch(&view);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(loader.cache().is_resolved(&view));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
