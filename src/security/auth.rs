//! Authentication state providers.
//!
//! The guard asks the provider on every navigation; nothing here is cached
//! by the router.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Authentication state at the time of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

impl AuthState {
    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

impl From<bool> for AuthState {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }
}

/// Source of the current authentication state.
#[async_trait]
pub trait AuthStateProvider: Send + Sync + 'static {
    async fn is_authenticated(&self) -> bool;

    async fn auth_state(&self) -> AuthState {
        self.is_authenticated().await.into()
    }
}

/// In-process session flag, flipped by the authentication subsystem.
#[derive(Debug, Default)]
pub struct SessionAuth {
    authenticated: AtomicBool,
}

impl SessionAuth {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: AtomicBool::new(authenticated),
        }
    }

    pub fn sign_in(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
        tracing::info!("Session signed in");
    }

    pub fn sign_out(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
        tracing::info!("Session signed out");
    }
}

#[async_trait]
impl AuthStateProvider for SessionAuth {
    async fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}
