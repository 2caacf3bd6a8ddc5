//! Request handlers.
//!
//! # Responsibilities
//! - Gateway handler: classify the path, record telemetry, answer with the decision
//! - Health handler: static liveness report
//! - Metrics handler: Prometheus text exposition
//!
//! # Design Decisions
//! - The in-flight guard is taken before classification and released on every exit
//! - Routing failures are always answered with 404, never propagated
//! - Health and metrics bypass the classifier and telemetry

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::request_id_of;
use crate::http::response::{timestamp_now, ErrorResponse, GatewayResponse, HealthResponse};
use crate::http::server::AppState;
use crate::observability::RequestOutcome;

pub const GATEWAY_MESSAGE: &str = "Gateway received request";
pub const SERVICE_NAME: &str = "gateway";
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Main gateway handler.
/// Looks up the owning service and reports it; nothing is forwarded.
pub async fn route_request(State(state): State<AppState>, request: Request) -> Response {
    let in_flight = state.telemetry.begin();
    let start = Instant::now();

    let method = request.method().as_str();
    let path = request.uri().path();
    let request_id = request_id_of(&request);

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Gateway request received"
    );

    let response = match state.router.classify(path) {
        Ok(service) => {
            let elapsed = start.elapsed();
            state.telemetry.record(&RequestOutcome {
                method,
                path,
                status_code: StatusCode::OK.as_u16(),
                target_service: Some(service),
                elapsed,
            });

            tracing::info!(
                request_id = %request_id,
                path = %path,
                target_service = %service,
                duration = ?elapsed,
                "Request routed successfully"
            );

            let body = GatewayResponse {
                message: GATEWAY_MESSAGE.to_string(),
                method: method.to_string(),
                path: path.to_string(),
                target_service: service.to_string(),
                timestamp: timestamp_now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(failure) => {
            state.telemetry.record(&RequestOutcome {
                method,
                path,
                status_code: StatusCode::NOT_FOUND.as_u16(),
                target_service: None,
                elapsed: start.elapsed(),
            });

            tracing::warn!(
                request_id = %request_id,
                path = %path,
                error = %failure,
                "Failed to route request"
            );

            let body = ErrorResponse {
                error: failure.to_string(),
                path: path.to_string(),
                code: StatusCode::NOT_FOUND.as_u16(),
            };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    };

    in_flight.end();
    response
}

/// Liveness report. Does not touch routing or telemetry.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    tracing::debug!("Health check requested");

    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: state.version.to_string(),
        timestamp: timestamp_now(),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.telemetry.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::http::HttpServer;
    use crate::observability::Telemetry;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    fn test_app() -> (axum::Router, Telemetry) {
        let telemetry = Telemetry::new().unwrap();
        let server = HttpServer::new(GatewayConfig::default(), telemetry.clone());
        (server.router(), telemetry)
    }

    async fn send(app: axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_users_request() {
        let (app, _) = test_app();
        let (status, body) = send(app, "GET", "/users/123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], GATEWAY_MESSAGE);
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "/users/123");
        assert_eq!(body["target_service"], "users");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_products_request() {
        let (app, _) = test_app();
        let (status, body) = send(app, "POST", "/products/search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "POST");
        assert_eq!(body["target_service"], "products");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (app, _) = test_app();
        let (status, body) = send(app, "GET", "/unknown/path").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["path"], "/unknown/path");
        assert!(body["error"].as_str().unwrap().contains("/unknown/path"));
    }

    #[tokio::test]
    async fn test_root_is_not_found() {
        let (app, _) = test_app();
        let (status, body) = send(app, "GET", "/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/");
    }

    #[tokio::test]
    async fn test_post_health_is_routed_as_unknown() {
        let (app, telemetry) = test_app();
        let (status, body) = send(app, "POST", "/health").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["path"], "/health");
        assert!(telemetry.render().contains("endpoint=\"/health\""));
    }

    #[tokio::test]
    async fn test_health_bypasses_telemetry() {
        let (app, telemetry) = test_app();
        let (status, body) = send(app, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "gateway");
        assert_eq!(body["version"], concat!("v", env!("CARGO_PKG_VERSION")));
        assert!(!telemetry.render().contains("/health"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (app, _) = test_app();
        let (status, _) = send(app.clone(), "GET", "/users/1").await;
        assert_eq!(status, StatusCode::OK);

        let request = HttpRequest::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROMETHEUS_CONTENT_TYPE
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("gateway_http_requests_total"));
        assert!(text.contains("endpoint=\"/users/1\""));
        let active = text
            .lines()
            .find_map(|line| line.strip_prefix("gateway_http_requests_active "))
            .unwrap();
        assert_eq!(active.parse::<f64>().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let (app, _) = test_app();
        let request = HttpRequest::builder()
            .uri("/users")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let (app, _) = test_app();
        let request = HttpRequest::builder()
            .uri("/users")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}
