//! Module fetch primitives.
//!
//! A `ModuleSource` knows how to fetch one view module. It does no caching;
//! the lazy loader wraps it with deduplication.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use crate::routing::ViewRef;

/// A loaded view module, ready to hand to the rendering framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModule {
    pub view: ViewRef,
    pub body: String,
}

impl ViewModule {
    pub fn new(view: ViewRef, body: impl Into<String>) -> Self {
        Self {
            view,
            body: body.into(),
        }
    }
}

/// Errors from the underlying fetch primitive.
#[derive(Debug, thiserror::Error)]
pub enum ModuleFetchError {
    #[error("module not found: {0}")]
    NotFound(String),

    #[error("module reference escapes the views root: {0}")]
    OutsideRoot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Fetches a view module by reference.
#[async_trait]
pub trait ModuleSource: Send + Sync + 'static {
    async fn load_module(&self, view: &ViewRef) -> Result<ViewModule, ModuleFetchError>;
}

/// Loads view modules from files under a views directory.
#[derive(Debug, Clone)]
pub struct FsModuleSource {
    root: PathBuf,
}

impl FsModuleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a view reference to a file below the root.
    fn resolve(&self, view: &ViewRef) -> Result<PathBuf, ModuleFetchError> {
        let relative = Path::new(view.as_str());
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ModuleFetchError::OutsideRoot(view.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ModuleSource for FsModuleSource {
    async fn load_module(&self, view: &ViewRef) -> Result<ViewModule, ModuleFetchError> {
        let path = self.resolve(view)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(ViewModule::new(view.clone(), body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ModuleFetchError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
