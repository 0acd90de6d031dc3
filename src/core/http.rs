//! Status server: liveness, Prometheus metrics and the latest cycle report

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::core::orchestrator::{CycleReport, SharedReport};
use crate::metrics::Metrics;

/// Cycles missed before the scanner reports itself stale
const STALE_AFTER_CYCLES: u32 = 3;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub last_report: SharedReport,
    /// Age of the last cycle start after which `/health` answers 503
    pub stale_after: Duration,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, last_report: SharedReport, interval: Duration) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            last_report,
            stale_after: interval * STALE_AFTER_CYCLES,
        }
    }
}

/// Scanner liveness as seen from the last cycle report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerHealth {
    /// No cycle has finished yet
    Starting,
    Healthy,
    /// The last cycle started longer ago than `stale_after`
    Stale,
}

impl ScannerHealth {
    pub fn assess(report: Option<&CycleReport>, stale_after: Duration) -> Self {
        let Some(report) = report else {
            return ScannerHealth::Starting;
        };
        let age = (Utc::now() - report.started_at).to_std().unwrap_or_default();
        if age > stale_after {
            ScannerHealth::Stale
        } else {
            ScannerHealth::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerHealth::Starting => "starting",
            ScannerHealth::Healthy => "healthy",
            ScannerHealth::Stale => "stale",
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let report = state.last_report.read().await.clone();
    let health = ScannerHealth::assess(report.as_ref(), state.stale_after);
    let code = match health {
        ScannerHealth::Stale => StatusCode::SERVICE_UNAVAILABLE,
        ScannerHealth::Starting | ScannerHealth::Healthy => StatusCode::OK,
    };

    (
        code,
        Json(json!({
            "status": health.as_str(),
            "uptime_seconds": state.start_time.elapsed().as_secs(),
            "service": "pumpwatch-scanner",
            "last_cycle_at": report.as_ref().map(|r| r.started_at),
            "last_cycle_status": report.as_ref().map(|r| r.status),
        })),
    )
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Latest cycle report, `null` before the first cycle
pub async fn status_handler(State(state): State<AppState>) -> Json<Option<CycleReport>> {
    Json(state.last_report.read().await.clone())
}

async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let elapsed = start.elapsed();
    state.metrics.record_http_request(&route, status.as_u16(), elapsed);

    if status.is_server_error() {
        warn!(
            route = %route,
            status = %status,
            duration_ms = elapsed.as_millis() as u64,
            "Status server answered {} on {}",
            status,
            route
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/status", get(status_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = port, "Status server listening on port {}", port);
    axum::serve(listener, create_router(state)).await
}
