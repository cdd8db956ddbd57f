//! Descriptor table: route lookup by path and by name.
//!
//! # Responsibilities
//! - Store registered route descriptors
//! - Look up a descriptor by normalized path or by name
//! - Reject ambiguous tables at registration
//!
//! # Design Decisions
//! - Registration is all-or-nothing per batch
//! - O(1) lookup via HashMap on both keys
//! - Assembled once at startup, then shared immutably behind `Arc`
//! - Explicit `None` for no-match rather than a silent default

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::routing::descriptor::{DescriptorError, RouteDescriptor};
use crate::routing::matcher::normalize_path;

/// Which unique key collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteField {
    Path,
    Name,
}

impl fmt::Display for RouteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteField::Path => f.write_str("path"),
            RouteField::Name => f.write_str("name"),
        }
    }
}

/// Errors raised while registering descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two routes share a path or a name.
    #[error("duplicate route {field}: '{value}'")]
    DuplicateRoute { field: RouteField, value: String },

    /// A descriptor failed shape validation.
    #[error("invalid route descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// The table of registered routes.
#[derive(Debug, Default)]
pub struct DescriptorTable {
    routes: Vec<Arc<RouteDescriptor>>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl DescriptorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from one batch of descriptors.
    pub fn from_descriptors(descriptors: Vec<RouteDescriptor>) -> RegistryResult<Self> {
        let mut table = Self::new();
        table.register(descriptors)?;
        Ok(table)
    }

    /// Register a batch of descriptors.
    ///
    /// The whole batch is validated against the existing entries and against
    /// itself before anything is inserted, so a failed call leaves the table
    /// unchanged.
    pub fn register(&mut self, descriptors: Vec<RouteDescriptor>) -> RegistryResult<()> {
        let mut staged = Vec::with_capacity(descriptors.len());
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for descriptor in descriptors {
            let descriptor = descriptor.validated()?;

            if self.by_path.contains_key(&descriptor.path) || !paths.insert(descriptor.path.clone()) {
                return Err(RegistryError::DuplicateRoute {
                    field: RouteField::Path,
                    value: descriptor.path,
                });
            }
            if self.by_name.contains_key(&descriptor.name) || !names.insert(descriptor.name.clone()) {
                return Err(RegistryError::DuplicateRoute {
                    field: RouteField::Name,
                    value: descriptor.name,
                });
            }
            staged.push(descriptor);
        }

        for descriptor in staged {
            let index = self.routes.len();
            tracing::debug!(path = %descriptor.path, name = %descriptor.name, view = %descriptor.view, "Route registered");
            self.by_path.insert(descriptor.path.clone(), index);
            self.by_name.insert(descriptor.name.clone(), index);
            self.routes.push(Arc::new(descriptor));
        }

        Ok(())
    }

    /// Look up a route by path. The path is normalized first.
    pub fn lookup(&self, path: &str) -> Option<Arc<RouteDescriptor>> {
        self.by_path
            .get(&normalize_path(path))
            .map(|&i| self.routes[i].clone())
    }

    /// Look up a route by its symbolic name.
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<RouteDescriptor>> {
        self.by_name.get(name).map(|&i| self.routes[i].clone())
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDescriptor>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
