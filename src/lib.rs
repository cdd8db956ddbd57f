//! Route registry and navigation resolution for single-page applications.

pub mod config;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod security;
pub mod title;
pub mod view;

pub use config::RouterConfig;
pub use navigation::{NavigationError, NavigationOutcome, NavigationRequest, Router};
pub use routing::{DescriptorTable, RouteDescriptor, RouteMeta, ViewRef};
