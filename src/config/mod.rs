//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → title / guard sections injected into their components
//!     → routes registered into the DescriptorTable
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; the route table is never hot-reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::GuardConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouterConfig;
pub use schema::TitleConfig;
pub use schema::ViewsConfig;
