//! Startup orchestration.
//!
//! # Responsibilities
//! - Register the route table from configuration
//! - Wire title resolver, guard and view loader into a router
//! - Optionally start prefetching public views
//!
//! # Design Decisions
//! - Fail fast: any registration error is fatal, nothing is half-registered
//! - Subsystems initialize in order, not concurrently

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, ConfigError, RouterConfig};
use crate::navigation::Router;
use crate::routing::{DescriptorTable, RegistryError};
use crate::security::{AuthStateProvider, NavigationGuard};
use crate::title::TitleResolver;
use crate::view::{FsModuleSource, LazyViewLoader, ModuleSource};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route registration failed: {0}")]
    Registry(#[from] RegistryError),
}

/// Build a router from an already loaded configuration.
///
/// Prefetching (when enabled) spawns tasks, so it needs a Tokio runtime.
pub fn build_router(
    config: &RouterConfig,
    source: Arc<dyn ModuleSource>,
    auth: Arc<dyn AuthStateProvider>,
) -> Result<Router, StartupError> {
    let table = DescriptorTable::from_descriptors(config.routes.clone())?;
    tracing::info!(routes = table.len(), "Route table registered");

    let router = Router::new(
        Arc::new(table),
        LazyViewLoader::new(source),
        TitleResolver::new(config.title.clone()),
        NavigationGuard::new(config.guard.clone()),
        auth,
    );

    if config.views.prefetch {
        let started = router.prefetch_public();
        tracing::info!(views = started, "Prefetching public views");
    }

    Ok(router)
}

/// Directory views are read from. A relative `views.root` is resolved
/// against the directory of the config file at `config_path`.
pub fn views_root(config_path: &Path, config: &RouterConfig) -> PathBuf {
    match config_path.parent() {
        Some(dir) => dir.join(&config.views.root),
        None => PathBuf::from(&config.views.root),
    }
}

/// Build a router from a loaded configuration, reading views from disk.
pub fn build_fs_router(
    config_path: &Path,
    config: &RouterConfig,
    auth: Arc<dyn AuthStateProvider>,
) -> Result<Router, StartupError> {
    let root = views_root(config_path, config);
    tracing::debug!(views_root = %root.display(), "Resolved views root");
    build_router(config, Arc::new(FsModuleSource::new(root)), auth)
}

/// Load the configuration file and build a router that reads views from disk.
pub fn start_from_file(
    path: &Path,
    auth: Arc<dyn AuthStateProvider>,
) -> Result<(RouterConfig, Router), StartupError> {
    let config = load_config(path)?;
    let router = build_fs_router(path, &config, auth)?;
    Ok((config, router))
}
