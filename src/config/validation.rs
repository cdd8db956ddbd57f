//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route shapes and uniqueness of paths and names
//! - Check the guard's login route is reachable anonymously
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use crate::config::schema::RouterConfig;
use crate::routing::descriptor::DescriptorError;
use crate::routing::matcher::{normalize_path, validate_route_path, PathError};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("routes[{index}]: {source}")]
    Route { index: usize, source: DescriptorError },

    #[error("routes[{index}]: duplicate path '{path}'")]
    DuplicatePath { index: usize, path: String },

    #[error("routes[{index}]: duplicate name '{name}'")]
    DuplicateName { index: usize, name: String },

    #[error("guard.login_path: {0}")]
    LoginPath(PathError),

    #[error("guard.login_path '{0}' is registered but not public")]
    LoginRouteNotPublic(String),

    #[error("guard.redirect_param must not be empty")]
    EmptyRedirectParam,

    #[error("views.root must not be empty")]
    EmptyViewsRoot,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut paths = HashSet::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        match route.clone().validated() {
            Ok(route) => {
                if !paths.insert(route.path.clone()) {
                    errors.push(ValidationError::DuplicatePath { index, path: route.path.clone() });
                }
                if !names.insert(route.name.clone()) {
                    errors.push(ValidationError::DuplicateName { index, name: route.name });
                }
            }
            Err(source) => errors.push(ValidationError::Route { index, source }),
        }
    }

    if let Some(login_path) = &config.guard.login_path {
        match validate_route_path(login_path) {
            Ok(login_path) => {
                let login_route = config
                    .routes
                    .iter()
                    .find(|r| normalize_path(&r.path) == login_path);
                if let Some(route) = login_route {
                    if !route.meta.public {
                        errors.push(ValidationError::LoginRouteNotPublic(login_path));
                    }
                }
            }
            Err(e) => errors.push(ValidationError::LoginPath(e)),
        }
    }

    if config.guard.redirect_param.trim().is_empty() {
        errors.push(ValidationError::EmptyRedirectParam);
    }

    if config.views.root.trim().is_empty() {
        errors.push(ValidationError::EmptyViewsRoot);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
