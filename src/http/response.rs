//! Response bodies.
//!
//! # Responsibilities
//! - JSON shapes for routed, unroutable and health responses
//! - RFC 3339 timestamps
//!
//! # Design Decisions
//! - Field names are the wire contract; do not rename
//! - Timestamps are UTC with second precision

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body returned when a path was attributed to a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayResponse {
    pub message: String,
    pub method: String,
    pub path: String,
    pub target_service: String,
    pub timestamp: String,
}

/// Body returned when no service owns the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub path: String,
    pub code: u16,
}

/// Liveness body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Current time as e.g. `2025-08-01T12:30:00Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
