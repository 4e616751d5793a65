//! API route configuration.
//!
//! Chart endpoints require a backend token via
//! [`crate::api::middleware::auth`]; the page-control helper is public.

use crate::api::handlers::{
    pager_handler, summary_handler, trips_by_company_handler, trips_over_time_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes protected by bearer token or session cookie.
///
/// # Endpoints
///
/// - `GET /analytics/summary`          - Summary card figures
/// - `GET /analytics/trips-by-company` - Pie chart slices with shares
/// - `GET /analytics/trips-over-time`  - Daily series without gaps
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/summary", get(summary_handler))
        .route("/analytics/trips-by-company", get(trips_by_company_handler))
        .route("/analytics/trips-over-time", get(trips_over_time_handler))
}

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /pager?page=&total_pages=` - Page controls for client-side tables
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/pager", get(pager_handler))
}
