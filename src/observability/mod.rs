//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape via /metrics)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through request spans
//! - Metrics state is injected, never a hidden global

pub mod logging;
pub mod metrics;

pub use self::metrics::{InFlightGuard, RequestOutcome, Telemetry};
