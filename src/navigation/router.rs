//! Router core: resolves navigation requests.
//!
//! # Responsibilities
//! - Match the target against the descriptor table
//! - Authorize before any view fetch
//! - Load the view and resolve the title
//! - Commit the result as the current route unless a newer navigation started
//!
//! # Design Decisions
//! - Exactly one guard evaluation per navigation
//! - The router never follows a redirect by itself
//! - A superseded navigation is discarded but its module load is not aborted
//! - Per-navigation failures never touch the table or poison the cache

use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::navigation::outcome::{
    NavigationError, NavigationMode, NavigationOutcome, NavigationPhase, NavigationRequest, ResolvedRoute,
};
use crate::observability::metrics;
use crate::routing::matcher::parse_target;
use crate::routing::DescriptorTable;
use crate::security::{AuthStateProvider, GuardVerdict, NavigationGuard};
use crate::title::TitleResolver;
use crate::view::LazyViewLoader;

/// Orchestrates matching, authorization, loading and title resolution.
pub struct Router {
    table: Arc<DescriptorTable>,
    loader: LazyViewLoader,
    titles: TitleResolver,
    guard: NavigationGuard,
    auth: Arc<dyn AuthStateProvider>,
    /// Sequence number of the most recently started navigation.
    latest: AtomicU64,
    current: ArcSwapOption<ResolvedRoute>,
}

impl Router {
    pub fn new(
        table: Arc<DescriptorTable>,
        loader: LazyViewLoader,
        titles: TitleResolver,
        guard: NavigationGuard,
        auth: Arc<dyn AuthStateProvider>,
    ) -> Self {
        Self {
            table,
            loader,
            titles,
            guard,
            auth,
            latest: AtomicU64::new(0),
            current: ArcSwapOption::empty(),
        }
    }

    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    pub fn loader(&self) -> &LazyViewLoader {
        &self.loader
    }

    /// The route currently displayed, if any navigation has resolved.
    pub fn current(&self) -> Option<Arc<ResolvedRoute>> {
        self.current.load_full()
    }

    /// Navigate to a target path.
    pub async fn navigate(&self, request: NavigationRequest) -> Result<NavigationOutcome, NavigationError> {
        let start = Instant::now();
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let navigation_id = Uuid::new_v4();
        let span = tracing::debug_span!("navigation", id = %navigation_id, requested = %request.target);

        let result = self.resolve(seq, navigation_id, &request).instrument(span).await;

        let phase = match &result {
            Ok(outcome) => outcome.phase(),
            Err(e) => e.phase(),
        };
        metrics::record_navigation(phase.as_str(), start);
        result
    }

    /// Navigate to a route by its symbolic name.
    pub async fn navigate_to_name(
        &self,
        name: &str,
        mode: NavigationMode,
    ) -> Result<NavigationOutcome, NavigationError> {
        let Some(route) = self.table.lookup_by_name(name) else {
            tracing::info!(name = %name, "No route with that name");
            return Err(NavigationError::UnknownName { name: name.to_string() });
        };
        self.navigate(NavigationRequest {
            target: route.path.clone(),
            mode,
        })
        .await
    }

    /// Start loading the views of all public routes in the background.
    pub fn prefetch_public(&self) -> usize {
        let mut started = 0;
        for route in self.table.iter().filter(|r| r.meta.public) {
            self.loader.prefetch(&route.view);
            started += 1;
        }
        started
    }

    async fn resolve(
        &self,
        seq: u64,
        navigation_id: Uuid,
        request: &NavigationRequest,
    ) -> Result<NavigationOutcome, NavigationError> {
        enter(NavigationPhase::Matching);
        let target = parse_target(&request.target);
        let Some(route) = self.table.lookup(&target.path) else {
            enter(NavigationPhase::NotFound);
            tracing::info!(path = %target.path, "No route matched");
            return Err(NavigationError::NotFound { path: target.path });
        };

        enter(NavigationPhase::Authorizing);
        let auth = self.auth.auth_state().await;
        match self.guard.authorize(&route.meta, auth, &request.target) {
            GuardVerdict::Allow => {}
            GuardVerdict::Redirect { target, return_to } => {
                enter(NavigationPhase::Redirected);
                tracing::info!(route = %route.name, redirect = %target, "Navigation redirected to login");
                return Ok(NavigationOutcome::Redirected { target, return_to });
            }
            GuardVerdict::Deny(reason) => {
                enter(NavigationPhase::Denied);
                tracing::warn!(route = %route.name, reason = %reason, "Navigation denied");
                return Ok(NavigationOutcome::Denied { reason });
            }
        }

        enter(NavigationPhase::Loading);
        let title = self.titles.resolve(&route.meta);
        let loaded = self.loader.load(&route.view).await;

        if self.latest.load(Ordering::SeqCst) != seq {
            return Err(self.superseded(&route.name, target.path));
        }

        let view = match loaded {
            Ok(view) => view,
            Err(e) => {
                enter(NavigationPhase::Failed);
                tracing::warn!(route = %route.name, error = %e, "Navigation failed");
                return Err(e.into());
            }
        };

        let committed = self.commit(ResolvedRoute {
            navigation_id,
            sequence: seq,
            path: route.path.clone(),
            name: route.name.clone(),
            title: title.clone(),
            mode: request.mode,
            query: target.query,
            fragment: target.fragment,
            view: view.clone(),
        });
        if !committed {
            return Err(self.superseded(&route.name, target.path));
        }

        enter(NavigationPhase::Resolved);
        tracing::info!(route = %route.name, title = %title, "Navigation resolved");
        Ok(NavigationOutcome::Allowed { title, view })
    }

    /// Publish `route` as current unless a newer navigation already committed.
    fn commit(&self, route: ResolvedRoute) -> bool {
        let sequence = route.sequence;
        let next = Some(Arc::new(route));
        let previous = self.current.rcu(|current| match current {
            Some(newer) if newer.sequence > sequence => current.clone(),
            _ => next.clone(),
        });
        !previous.is_some_and(|p| p.sequence > sequence)
    }

    fn superseded(&self, route: &str, path: String) -> NavigationError {
        enter(NavigationPhase::Superseded);
        tracing::debug!(route = %route, "Discarding superseded navigation");
        NavigationError::Superseded { path }
    }
}

fn enter(phase: NavigationPhase) {
    tracing::debug!(phase = %phase, "Navigation phase");
}
