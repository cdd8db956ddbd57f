//! Navigation guard.
//!
//! # Responsibilities
//! - Decide whether a navigation may enter a route
//! - Send anonymous users to the login route, remembering where they wanted to go
//!
//! # Design Decisions
//! - Public routes are always allowed
//! - Fail closed: no login route configured means deny, not allow
//! - A non-public login route is denied rather than redirected to itself

use serde::Serialize;
use std::fmt;

use crate::config::GuardConfig;
use crate::routing::matcher::{normalize_path, parse_target, with_query_param};
use crate::routing::RouteMeta;
use crate::security::auth::AuthState;

/// Why a navigation was denied outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Authentication is required but no login route is configured.
    LoginUnavailable,
    /// The login route itself requires authentication.
    RedirectLoop,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::LoginUnavailable => f.write_str("login_unavailable"),
            DenyReason::RedirectLoop => f.write_str("redirect_loop"),
        }
    }
}

/// The guard's decision for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    Allow,
    Redirect {
        /// Full redirect target, e.g. `/login?redirect=%2Fsettings`.
        target: String,
        /// The originally requested target.
        return_to: String,
    },
    Deny(DenyReason),
}

/// Evaluates route access policy against the authentication state.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    config: GuardConfig,
}

impl NavigationGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    pub fn login_path(&self) -> Option<&str> {
        self.config.login_path.as_deref()
    }

    /// Authorize a navigation to `requested` (the target as the caller wrote it).
    pub fn authorize(&self, meta: &RouteMeta, auth: AuthState, requested: &str) -> GuardVerdict {
        if meta.public || auth.is_authenticated() {
            return GuardVerdict::Allow;
        }

        let Some(login_path) = self.config.login_path.as_deref() else {
            tracing::warn!(requested = %requested, "Authentication required but no login route configured");
            return GuardVerdict::Deny(DenyReason::LoginUnavailable);
        };

        if parse_target(requested).path == normalize_path(login_path) {
            tracing::warn!(login_path = %login_path, "Login route requires authentication");
            return GuardVerdict::Deny(DenyReason::RedirectLoop);
        }

        GuardVerdict::Redirect {
            target: with_query_param(login_path, &self.config.redirect_param, requested),
            return_to: requested.to_string(),
        }
    }
}
