//! Title resolution from route metadata.
//!
//! # Design Decisions
//! - Pure: depends only on the route metadata and the injected config
//! - A missing route title falls back to `default_title`, used as-is
//! - An empty suffix never leaves a dangling delimiter

use crate::config::TitleConfig;
use crate::routing::RouteMeta;

/// Derives the displayed page title for a route.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    config: TitleConfig,
}

impl TitleResolver {
    pub fn new(config: TitleConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, meta: &RouteMeta) -> String {
        let Some(title) = meta.title.as_deref() else {
            return self.config.default_title.clone();
        };

        if meta.hide_title_suffix || self.config.suffix.is_empty() {
            return title.to_string();
        }

        format!("{}{}{}", title, self.config.delimiter, self.config.suffix)
    }
}
