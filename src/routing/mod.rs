//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     RouteDescriptor[]
//!     → descriptor.rs (shape validation, path normalization)
//!     → table.rs (uniqueness check, all-or-nothing insert)
//!     → Freeze as immutable DescriptorTable
//!
//! Navigation target (path, query, fragment)
//!     → matcher.rs (split + normalize)
//!     → table.rs (exact lookup)
//!     → Return: matched RouteDescriptor or None
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Exact path matching only, no patterns
//! - Deterministic: same input always matches same route

pub mod descriptor;
pub mod matcher;
pub mod table;

pub use descriptor::{RouteDescriptor, RouteMeta, ViewRef};
pub use table::{DescriptorTable, RegistryError, RouteField};
