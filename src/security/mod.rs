//! Access control subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation matched a route:
//!     → auth.rs (query AuthStateProvider, fresh every time)
//!     → guard.rs (route meta + auth state → Allow / Redirect / Deny)
//!     → only Allow proceeds to view loading
//! ```
//!
//! # Design Decisions
//! - Authorization always runs before any view fetch
//! - Fail closed: reject when policy cannot be satisfied
//! - Auth state is never cached across navigations

pub mod auth;
pub mod guard;

pub use auth::{AuthState, AuthStateProvider, SessionAuth};
pub use guard::{DenyReason, GuardVerdict, NavigationGuard};
