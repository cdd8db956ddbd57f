//! Route descriptor types.
//!
//! A descriptor is the declarative record an application author writes for
//! one navigable route. Descriptors are immutable once registered.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::routing::matcher::{validate_route_path, PathError};

/// Opaque handle to a not-yet-loaded view module (e.g. `home/index.vue`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    /// Create a view reference. A leading `/` is stripped so that
    /// `/home/index.vue` and `home/index.vue` name the same module.
    pub fn new(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        let trimmed = reference.trim().trim_start_matches('/');
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ViewRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ViewRef::new)
    }
}

impl From<&str> for ViewRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Per-route metadata controlling page title and access policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteMeta {
    /// Display string for the page title.
    pub title: Option<String>,

    /// Omit the global title suffix for this route.
    #[serde(alias = "hideTitleSuffix")]
    pub hide_title_suffix: bool,

    /// Allow the route without an authenticated session.
    pub public: bool,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn hide_suffix(mut self) -> Self {
        self.hide_title_suffix = true;
        self
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

/// A single declared route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Normalized URL path, always starting with `/`.
    pub path: String,

    /// Symbolic identifier used for programmatic navigation.
    pub name: String,

    /// Deferred view module for this route.
    pub view: ViewRef,

    #[serde(default)]
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewRef>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            meta: RouteMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Check the descriptor shape and return it with its path normalized.
    pub fn validated(mut self) -> Result<Self, DescriptorError> {
        self.path = validate_route_path(&self.path).map_err(|source| DescriptorError::Path {
            name: self.name.clone(),
            source,
        })?;
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName { path: self.path });
        }
        if self.view.is_empty() {
            return Err(DescriptorError::EmptyView { name: self.name });
        }
        Ok(self)
    }
}

/// Shape errors found while validating a single descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("route '{name}' has an invalid path: {source}")]
    Path { name: String, source: PathError },

    #[error("route at '{path}' has an empty name")]
    EmptyName { path: String },

    #[error("route '{name}' has an empty view reference")]
    EmptyView { name: String },
}
