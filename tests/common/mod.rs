//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use route_registry::config::{GuardConfig, TitleConfig};
use route_registry::navigation::Router;
use route_registry::routing::{DescriptorTable, RouteDescriptor, RouteMeta, ViewRef};
use route_registry::security::{NavigationGuard, SessionAuth};
use route_registry::title::TitleResolver;
use route_registry::view::{LazyViewLoader, ModuleFetchError, ModuleSource, ViewModule};

/// A module source with per-view delays, injectable failures and call counting.
#[derive(Default)]
pub struct ProgrammableSource {
    calls: AtomicUsize,
    per_view: DashMap<ViewRef, usize>,
    delays: DashMap<ViewRef, Duration>,
    failures: DashMap<ViewRef, usize>,
}

impl ProgrammableSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_delay(self: Arc<Self>, view: &str, delay: Duration) -> Arc<Self> {
        self.delays.insert(ViewRef::new(view), delay);
        self
    }

    /// Fail the next `count` fetches of `view`.
    pub fn failing(self: Arc<Self>, view: &str, count: usize) -> Arc<Self> {
        self.failures.insert(ViewRef::new(view), count);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, view: &str) -> usize {
        self.per_view.get(&ViewRef::new(view)).map(|r| *r).unwrap_or(0)
    }
}

#[async_trait]
impl ModuleSource for ProgrammableSource {
    async fn load_module(&self, view: &ViewRef) -> Result<ViewModule, ModuleFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.per_view.entry(view.clone()).or_insert(0) += 1;

        let delay = self.delays.get(view).map(|r| *r).unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;

        if let Some(mut remaining) = self.failures.get_mut(view) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ModuleFetchError::Other(format!("injected failure for {view}")));
            }
        }

        Ok(ViewModule::new(view.clone(), format!("<template>{view}</template>")))
    }
}

pub fn title_config() -> TitleConfig {
    TitleConfig {
        suffix: "MyApp".into(),
        delimiter: " - ".into(),
        default_title: "MyApp".into(),
    }
}

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("/home", "home", "home/index.vue")
            .with_meta(RouteMeta::titled("P2P视频通话").hide_suffix().public()),
        RouteDescriptor::new("/login", "login", "login/index.vue")
            .with_meta(RouteMeta::titled("Sign in").public()),
        RouteDescriptor::new("/settings", "settings", "settings/index.vue")
            .with_meta(RouteMeta::titled("Settings")),
        RouteDescriptor::new("/slow", "slow", "slow/index.vue").with_meta(RouteMeta::default().public()),
    ]
}

pub fn router(source: Arc<ProgrammableSource>, auth: Arc<SessionAuth>) -> Router {
    let table = DescriptorTable::from_descriptors(routes()).expect("test routes are valid");
    Router::new(
        Arc::new(table),
        LazyViewLoader::new(source),
        TitleResolver::new(title_config()),
        NavigationGuard::new(GuardConfig::default()),
        auth,
    )
}
