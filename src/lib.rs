//! HTTP front door that attributes request paths to downstream services.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Telemetry;
pub use routing::{RoutingFailure, ServiceRouter, TargetService};
