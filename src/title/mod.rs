//! Page title derivation.

pub mod resolver;

pub use resolver::TitleResolver;
