//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::api::dto::health::HealthResponse;
use crate::application::services::HealthService;

/// Reports whether the service can reach its database and cache.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: every check passed
/// - **503 Service Unavailable**: at least one check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "checks": { "database": "ok", "redis": "ok" }
/// }
/// ```
pub async fn health_handler(
    State(health): State<Arc<HealthService>>,
) -> (StatusCode, Json<HealthResponse>) {
    let report = health.check().await;

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report.into()))
}
