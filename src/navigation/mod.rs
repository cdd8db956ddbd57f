//! Navigation resolution subsystem.
//!
//! # Data Flow
//! ```text
//! NavigationRequest (target, mode)
//!     → Matching     (routing: table lookup)      → NotFound
//!     → Authorizing  (security: guard)            → Redirected | Denied
//!     → Loading      (view: lazy loader, title)   → ViewLoad error
//!     → Resolved     (commit as current route)    → Superseded if a newer
//!                                                   navigation started
//! ```

pub mod outcome;
pub mod router;

pub use outcome::{
    NavigationError, NavigationMode, NavigationOutcome, NavigationPhase, NavigationRequest, ResolvedRoute,
};
pub use router::Router;
