//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::IntoResponse};

use crate::application::services::analytics_service::DEFAULT_RANGE_DAYS;
use crate::domain::entities::{AccessToken, DateRange};
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::handlers::{format_amount, today};

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with:
/// - Summary cards (drivers, document alerts, trips and payouts this month)
/// - A date range form driving the two charts
///
/// The charts load their data from `/api/analytics/*` in `static/charts.js`.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub total_drivers: u64,
    pub active_drivers: u64,
    pub expiring_documents: u64,
    pub expired_documents: u64,
    pub trips_this_month: u64,
    pub payouts_this_month: String,
    pub from: String,
    pub to: String,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> Result<impl IntoResponse, WebError> {
    let summary = state.analytics_service.summary(&token).await?;
    let range = DateRange::last_days(DEFAULT_RANGE_DAYS, today());

    Ok(DashboardTemplate {
        total_drivers: summary.total_drivers,
        active_drivers: summary.active_drivers,
        expiring_documents: summary.expiring_documents,
        expired_documents: summary.expired_documents,
        trips_this_month: summary.trips_this_month,
        payouts_this_month: format_amount(
            summary.payouts_this_month,
            summary.currency.as_deref().unwrap_or(""),
        ),
        from: range.from.to_string(),
        to: range.to.to_string(),
    })
}
