//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register routes → Wire router → (Prefetch)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then table, then router
//! - Registration errors abort startup; the router never serves a partial table

pub mod startup;

pub use startup::{build_fs_router, build_router, start_from_file, views_root, StartupError};
