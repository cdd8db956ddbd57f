//! Navigation request and outcome types.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::security::DenyReason;
use crate::view::{ViewLoadError, ViewModule};

/// History semantics requested by the caller; passed through to the framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Push,
    Replace,
}

/// A request to navigate to a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Target as written by the caller, may include query and fragment.
    pub target: String,
    pub mode: NavigationMode,
}

impl NavigationRequest {
    pub fn push(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Push,
        }
    }

    pub fn replace(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Replace,
        }
    }
}

/// Phases of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Matching,
    Authorizing,
    Loading,
    Resolved,
    Redirected,
    Denied,
    NotFound,
    Failed,
    Superseded,
}

impl NavigationPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationPhase::Matching => "matching",
            NavigationPhase::Authorizing => "authorizing",
            NavigationPhase::Loading => "loading",
            NavigationPhase::Resolved => "resolved",
            NavigationPhase::Redirected => "redirected",
            NavigationPhase::Denied => "denied",
            NavigationPhase::NotFound => "not_found",
            NavigationPhase::Failed => "failed",
            NavigationPhase::Superseded => "superseded",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            NavigationPhase::Matching
                | NavigationPhase::Authorizing
                | NavigationPhase::Loading
        )
    }
}

impl fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a navigation that reached the guard.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    Allowed {
        title: String,
        view: Arc<ViewModule>,
    },
    Redirected {
        /// Login target including the return parameter.
        target: String,
        /// The target that was originally requested.
        return_to: String,
    },
    Denied {
        reason: DenyReason,
    },
}

impl NavigationOutcome {
    pub fn phase(&self) -> NavigationPhase {
        match self {
            NavigationOutcome::Allowed { .. } => NavigationPhase::Resolved,
            NavigationOutcome::Redirected { .. } => NavigationPhase::Redirected,
            NavigationOutcome::Denied { .. } => NavigationPhase::Denied,
        }
    }
}

/// Navigation failures. Redirects and denials are outcomes, not errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NavigationError {
    /// No route is registered for the path.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// No route is registered under the name.
    #[error("no route named '{name}'")]
    UnknownName { name: String },

    /// The route's view module failed to load; a later navigation retries.
    #[error(transparent)]
    ViewLoad(#[from] ViewLoadError),

    /// A newer navigation started while this one was loading.
    #[error("navigation to '{path}' superseded by a newer navigation")]
    Superseded { path: String },
}

impl NavigationError {
    pub fn phase(&self) -> NavigationPhase {
        match self {
            NavigationError::NotFound { .. } | NavigationError::UnknownName { .. } => {
                NavigationPhase::NotFound
            }
            NavigationError::ViewLoad(_) => NavigationPhase::Failed,
            NavigationError::Superseded { .. } => NavigationPhase::Superseded,
        }
    }
}

/// The route the router currently displays.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRoute {
    pub navigation_id: Uuid,
    /// Start order of the navigation; a lower sequence never replaces a higher one.
    pub sequence: u64,
    pub path: String,
    pub name: String,
    pub title: String,
    pub mode: NavigationMode,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
    pub view: Arc<ViewModule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ViewRef;
    use crate::view::ModuleFetchError;

    #[test]
    fn test_terminal_phases() {
        assert!(!NavigationPhase::Loading.is_terminal());
        assert!(NavigationPhase::Redirected.is_terminal());
        assert_eq!(NavigationPhase::NotFound.to_string(), "not_found");
    }

    #[test]
    fn test_error_display_and_phase() {
        let err = NavigationError::NotFound { path: "/nope".into() };
        assert_eq!(err.to_string(), "no route matches '/nope'");
        assert_eq!(err.phase(), NavigationPhase::NotFound);

        let err: NavigationError =
            ViewLoadError::new(ViewRef::new("home/index.vue"), ModuleFetchError::Other("boom".into())).into();
        assert_eq!(err.to_string(), "failed to load view 'home/index.vue': boom");
        assert_eq!(err.phase(), NavigationPhase::Failed);
    }

    #[test]
    fn test_resolved_route_serializes_for_reports() {
        let view = ViewRef::new("settings/index.vue");
        let route = ResolvedRoute {
            navigation_id: Uuid::nil(),
            sequence: 4,
            path: "/settings".into(),
            name: "settings".into(),
            title: "Settings - MyApp".into(),
            mode: NavigationMode::Replace,
            query: vec![("tab".into(), "profile".into())],
            fragment: None,
            view: Arc::new(ViewModule::new(view, "<template/>")),
        };

        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["mode"], "replace");
        assert_eq!(json["sequence"], 4);
        assert_eq!(json["query"][0][1], "profile");
        assert_eq!(json["view"]["view"], "settings/index.vue");
    }

    #[test]
    fn test_request_constructors() {
        assert_eq!(NavigationRequest::push("/home").mode, NavigationMode::Push);
        assert_eq!(NavigationRequest::replace("/home").mode, NavigationMode::Replace);
    }
}
