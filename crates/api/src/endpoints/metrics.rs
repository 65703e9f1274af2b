//! Metrics endpoints for monitoring and observability.
//!
//! Provides endpoints for:
//! - JSON and Prometheus metrics export
//! - Liveness and readiness probes

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use stream_registry_common::metrics::{MetricsSnapshot, OperationSnapshot, get_metrics};

use crate::middleware::AppState;

/// Create the metrics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(get_metrics_json))
        .route("/metrics/prometheus", get(get_metrics_prometheus))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
}

/// JSON metrics response.
#[derive(Serialize)]
pub struct MetricsResponse {
    pub http: HttpMetrics,
    pub operations: Vec<OperationSnapshot>,
}

#[derive(Serialize)]
pub struct HttpMetrics {
    pub requests_total: u64,
    pub requests_active: u64,
    pub requests_2xx: u64,
    pub requests_4xx: u64,
    pub requests_5xx: u64,
    pub latency_avg_us: u64,
}

impl From<MetricsSnapshot> for MetricsResponse {
    fn from(s: MetricsSnapshot) -> Self {
        Self {
            http: HttpMetrics {
                requests_total: s.http_requests_total,
                requests_active: s.http_requests_active,
                requests_2xx: s.http_requests_2xx,
                requests_4xx: s.http_requests_4xx,
                requests_5xx: s.http_requests_5xx,
                latency_avg_us: s.http_request_latency_avg_us,
            },
            operations: s.operations,
        }
    }
}

/// Get metrics in JSON format.
async fn get_metrics_json() -> Json<MetricsResponse> {
    let snapshot = get_metrics().snapshot();
    Json(MetricsResponse::from(snapshot))
}

/// Get metrics in Prometheus text format.
async fn get_metrics_prometheus() -> Response {
    let prometheus_output = get_metrics().to_prometheus();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        prometheus_output,
    )
        .into_response()
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Simple health check (liveness probe).
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub store: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    pub latency_ms: Option<u64>,
}

/// Readiness check (readiness probe).
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let start = std::time::Instant::now();

    let store = match state.stores.streams.list_all().await {
        Ok(_) => CheckResult {
            status: "ok".to_string(),
            latency_ms: Some(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)),
        },
        Err(e) => CheckResult {
            status: format!("error: {e}"),
            latency_ms: None,
        },
    };

    let ready = store.status == "ok";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            checks: ReadinessChecks { store },
        }),
    )
}
