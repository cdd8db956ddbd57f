//! View loading subsystem.
//!
//! # Data Flow
//! ```text
//! load(view_ref)
//!     → cache.rs: Resolved? return module
//!     → cache.rs: Pending?  join the shared in-flight load
//!     → otherwise: spawn fetch via source.rs (ModuleSource),
//!       record Pending, await it
//!
//! Fetch task completes:
//!     Ok  → Pending → Resolved (kept for the session)
//!     Err → Pending removed (next load retries)
//! ```

pub mod cache;
pub mod loader;
pub mod source;

pub use cache::LoadedViewCache;
pub use loader::{LazyViewLoader, ViewLoadError};
pub use source::{FsModuleSource, ModuleFetchError, ModuleSource, ViewModule};
