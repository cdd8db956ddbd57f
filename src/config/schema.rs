//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::RouteDescriptor;

/// Root configuration for the route registry.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Page title policy.
    pub title: TitleConfig,

    /// Access policy for non-public routes.
    pub guard: GuardConfig,

    /// Where view modules are loaded from.
    pub views: ViewsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route table, in declaration order.
    pub routes: Vec<RouteDescriptor>,
}

/// Title suffix policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Appended to titles unless the route hides it (e.g. the brand name).
    pub suffix: String,

    /// Placed between the route title and the suffix.
    pub delimiter: String,

    /// Used when a route declares no title.
    pub default_title: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            suffix: String::new(),
            delimiter: " - ".to_string(),
            default_title: String::new(),
        }
    }
}

/// Navigation guard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Route anonymous users are sent to. `None` denies instead.
    pub login_path: Option<String>,

    /// Query parameter carrying the originally requested target.
    pub redirect_param: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: Some("/login".to_string()),
            redirect_param: "redirect".to_string(),
        }
    }
}

/// View module location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Directory view references are resolved against.
    pub root: String,

    /// Start loading public routes' views at startup instead of on first navigation.
    pub prefetch: bool,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            root: "views".to_string(),
            prefetch: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Install a Prometheus recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
        }
    }
}
