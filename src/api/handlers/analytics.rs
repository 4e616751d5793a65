//! Chart data for the dashboard home page.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Local;

use crate::api::dto::analytics::ChartResponse;
use crate::api::dto::pagination::DateFilterParams;
use crate::application::services::analytics_service::resolve_range;
use crate::domain::entities::{AccessToken, ChartSlice, DashboardSummary, SeriesPoint};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/analytics/summary` - figures for the summary cards.
pub async fn summary_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.analytics_service.summary(&token).await?))
}

/// `GET /api/analytics/trips-by-company?from=&to=` - pie chart slices.
///
/// Defaults to the last 30 days; ranges over 366 days are rejected.
pub async fn trips_by_company_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<DateFilterParams>,
) -> Result<Json<ChartResponse<ChartSlice>>, AppError> {
    let range = resolve_range(params.from, params.to, Local::now().date_naive())?;
    let slices = state
        .analytics_service
        .trips_by_company(&token, range)
        .await?;
    Ok(Json(ChartResponse::new(range, slices)))
}

/// `GET /api/analytics/trips-over-time?from=&to=` - one point per day.
pub async fn trips_over_time_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<DateFilterParams>,
) -> Result<Json<ChartResponse<SeriesPoint>>, AppError> {
    let range = resolve_range(params.from, params.to, Local::now().date_naive())?;
    let points = state
        .analytics_service
        .trips_over_time(&token, range)
        .await?;
    Ok(Json(ChartResponse::new(range, points)))
}
