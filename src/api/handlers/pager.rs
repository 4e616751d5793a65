use axum::{Json, extract::Query};

use crate::api::dto::pager::{PagerQuery, PagerResponse};
use crate::domain::pagination::generate_pagination_pages;

/// Computes page controls for client-side tables.
///
/// # Endpoint
///
/// `GET /api/pager?page=5&total_pages=10`
///
/// An out-of-range `page` is clamped into `1..=total_pages`; `total_pages=0`
/// yields an empty list.
pub async fn pager_handler(Query(query): Query<PagerQuery>) -> Json<PagerResponse> {
    let current_page = query.page.clamp(1, query.total_pages.max(1));

    Json(PagerResponse {
        current_page,
        total_pages: query.total_pages,
        items: generate_pagination_pages(query.page, query.total_pages),
    })
}
