//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (request volume, latency, concurrency)
//! - Track in-flight requests with guaranteed release
//! - Render Prometheus text exposition on demand
//!
//! # Metrics
//! - `gateway_http_requests_total` (counter): by method, endpoint, status_code, target_service
//! - `gateway_http_request_duration_seconds` (histogram): by method, endpoint, target_service
//! - `gateway_http_requests_active` (gauge): requests currently being processed
//!
//! # Design Decisions
//! - Each [`Telemetry`] owns its recorder; nothing is installed globally,
//!   so tests build disposable instances
//! - Low-overhead metric updates (atomic operations inside the exporter)
//! - `endpoint` is the raw request path. Label cardinality is unbounded
//!   under varied or adversarial paths.

use std::sync::Arc;
use std::time::Duration;

use metrics::Gauge;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::routing::TargetService;

pub const REQUESTS_TOTAL: &str = "gateway_http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "gateway_http_request_duration_seconds";
pub const REQUESTS_ACTIVE: &str = "gateway_http_requests_active";

/// Label value used when no service was resolved.
pub const NO_SERVICE: &str = "none";

/// Histogram bucket upper bounds in seconds, shared by every label set.
pub const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Outcome of one handled request, consumed by [`Telemetry::record`].
#[derive(Debug, Clone, Copy)]
pub struct RequestOutcome<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub status_code: u16,
    pub target_service: Option<TargetService>,
    pub elapsed: Duration,
}

struct Inner {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    in_flight: Gauge,
}

/// Request-lifecycle telemetry bound to a private Prometheus registry.
///
/// Cheap to clone; clones share the same counters.
#[derive(Clone)]
pub struct Telemetry {
    inner: Arc<Inner>,
}

impl Telemetry {
    /// Create telemetry with the default duration buckets.
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets(DURATION_BUCKETS)?
            .build_recorder();
        Ok(Self::with_recorder(recorder))
    }

    /// Bind to a caller-built recorder (custom buckets, global labels).
    pub fn with_recorder(recorder: PrometheusRecorder) -> Self {
        let handle = recorder.handle();

        let in_flight = metrics::with_local_recorder(&recorder, || {
            metrics::describe_counter!(
                REQUESTS_TOTAL,
                "Total number of HTTP requests processed by Gateway"
            );
            metrics::describe_histogram!(
                REQUEST_DURATION_SECONDS,
                metrics::Unit::Seconds,
                "HTTP request duration in seconds"
            );
            metrics::describe_gauge!(
                REQUESTS_ACTIVE,
                "Number of HTTP requests currently being processed"
            );
            metrics::gauge!(REQUESTS_ACTIVE)
        });
        in_flight.set(0.0);

        Self {
            inner: Arc::new(Inner {
                recorder,
                handle,
                in_flight,
            }),
        }
    }

    /// Mark a request as in flight until the returned guard is dropped.
    #[must_use = "dropping the guard immediately ends the request"]
    pub fn begin(&self) -> InFlightGuard {
        self.inner.in_flight.increment(1.0);
        InFlightGuard {
            gauge: self.inner.in_flight.clone(),
        }
    }

    /// Count the request and observe its latency.
    pub fn record(&self, outcome: &RequestOutcome<'_>) {
        let service = outcome
            .target_service
            .map_or(NO_SERVICE, |service| service.as_str());

        metrics::with_local_recorder(&self.inner.recorder, || {
            metrics::counter!(REQUESTS_TOTAL,
                "method" => outcome.method.to_string(),
                "endpoint" => outcome.path.to_string(),
                "status_code" => outcome.status_code.to_string(),
                "target_service" => service
            )
            .increment(1);

            metrics::histogram!(REQUEST_DURATION_SECONDS,
                "method" => outcome.method.to_string(),
                "endpoint" => outcome.path.to_string(),
                "target_service" => service
            )
            .record(outcome.elapsed.as_secs_f64());
        });
    }

    /// Prometheus text exposition of the current state.
    pub fn render(&self) -> String {
        self.inner.handle.render()
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

/// Decrements the in-flight gauge exactly once, on drop.
///
/// Drop runs on every exit path, panic unwinding included.
#[derive(Debug)]
pub struct InFlightGuard {
    gauge: Gauge,
}

impl InFlightGuard {
    /// End the request explicitly. Equivalent to dropping the guard.
    pub fn end(self) {}
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}
