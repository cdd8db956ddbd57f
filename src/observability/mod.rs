//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout/stderr via the fmt layer
//!     → Prometheus text rendered by the CLI
//! ```
//!
//! # Design Decisions
//! - Structured fields for machine parsing
//! - Navigation id flows through every navigation log event
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;
