use crate::infra::{AppState, DashboardServices};
use ats_dashboard::dashboard::dashboard_router;
use axum::extract::Request;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::time::Instant;
use tracing::info;

pub(crate) const PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Every record kind's dashboard routes plus the operational endpoints.
pub(crate) fn with_dashboard_routes(services: DashboardServices) -> axum::Router {
    let DashboardServices {
        jobs,
        candidates,
        interviews,
        customers,
    } = services;

    axum::Router::new()
        .merge(dashboard_router(jobs))
        .merge(dashboard_router(candidates))
        .merge(dashboard_router(interviews))
        .merge(dashboard_router(customers))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(middleware::from_fn(log_requests))
}

/// Logs each request and reports its handling time in seconds through
/// `X-Process-Time`.
pub(crate) async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let elapsed = started.elapsed();

    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", elapsed.as_secs_f64())) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "request handled"
    );

    response
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
