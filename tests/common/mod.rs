//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use gateway::{GatewayConfig, HttpServer, Shutdown, Telemetry};
use tokio::net::TcpListener;

/// A gateway served on an ephemeral local port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub telemetry: Telemetry,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway with default config and its own telemetry.
pub async fn spawn_gateway() -> TestGateway {
    let telemetry = Telemetry::new().unwrap();
    let server = HttpServer::new(GatewayConfig::default(), telemetry.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway {
        addr,
        telemetry,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Value of the sample `name{labels}` in a Prometheus text exposition.
/// Label order is ignored; the label set must match exactly.
pub fn sample(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    rendered.lines().find_map(|line| {
        if line.starts_with('#') {
            return None;
        }
        let (series, value) = line.rsplit_once(' ')?;
        let (series_name, series_labels) = match series.split_once('{') {
            Some((n, rest)) => (n, rest.trim_end_matches('}')),
            None => (series, ""),
        };
        if series_name != name {
            return None;
        }
        let parsed: Vec<(&str, &str)> = series_labels
            .split(',')
            .filter(|kv| !kv.is_empty())
            .filter_map(|kv| kv.split_once('='))
            .map(|(k, v)| (k, v.trim_matches('"')))
            .collect();
        if parsed.len() == labels.len() && labels.iter().all(|l| parsed.contains(l)) {
            value.parse().ok()
        } else {
            None
        }
    })
}

pub fn requests_total(rendered: &str, method: &str, path: &str, status: &str, service: &str) -> Option<f64> {
    sample(
        rendered,
        "gateway_http_requests_total",
        &[
            ("method", method),
            ("endpoint", path),
            ("status_code", status),
            ("target_service", service),
        ],
    )
}

pub fn active_requests(rendered: &str) -> Option<f64> {
    sample(rendered, "gateway_http_requests_active", &[])
}
