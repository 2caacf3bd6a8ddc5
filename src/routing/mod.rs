//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (normalise, ordered rule scan)
//!     → matcher.rs (prefix comparison)
//!     → Return: TargetService or RoutingFailure
//! ```
//!
//! # Design Decisions
//! - Rules are a static ordered table, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (table order)
//! - Pure: no shared state, safe to call from any task without locking

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, RoutingFailure, ServiceRouter, TargetService, DEFAULT_ROUTES};
