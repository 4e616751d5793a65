//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with dependency checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Backend and cache healthy
/// - **503 Service Unavailable**: One or more dependencies degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "backend": { "status": "ok", "message": "Backend reachable" },
///     "cache": { "status": "ok", "message": "redis" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (backend_check, cache_check) = tokio::join!(check_backend(&state), check_cache(&state));

    let all_healthy = backend_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            backend: backend_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_backend(state: &AppState) -> CheckStatus {
    if state.health.ping().await {
        CheckStatus::ok("Backend reachable")
    } else {
        CheckStatus::error("Backend unreachable")
    }
}

/// A disabled cache counts as healthy.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok(state.cache.name())
    } else {
        CheckStatus::error(format!("{} connection failed", state.cache.name()))
    }
}
