//! Payroll and trip record browsers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::api::dto::pagination::PaginationParams;
use crate::application::services::record_service::resolve_range;
use crate::domain::entities::{AccessToken, PaymentRecord, RecordFilter, TripRecord};
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::handlers::{format_amount, today};
use crate::web::pager::Pager;

/// Filters shared by both record browsers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub from: Option<NaiveDate>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub to: Option<NaiveDate>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub driver_id: Option<i64>,
}

/// Filter values echoed back into the form and the pager links.
pub struct FilterValues {
    pub from: String,
    pub to: String,
    pub driver_id: String,
}

impl RecordQuery {
    fn to_filter(&self, default_page_size: u32) -> Result<RecordFilter, WebError> {
        let pagination = PaginationParams {
            page: self.page,
            page_size: self.page_size,
        };
        let range = resolve_range(self.from, self.to, today())?;
        Ok(RecordFilter::new(pagination.to_request(default_page_size))
            .with_driver(self.driver_id)
            .with_range(range))
    }

    /// Echoes the effective range, so a bare `from` shows its implied end.
    fn values(&self, filter: &RecordFilter) -> FilterValues {
        FilterValues {
            from: filter.range.map(|r| r.from.to_string()).unwrap_or_default(),
            to: filter.range.map(|r| r.to.to_string()).unwrap_or_default(),
            driver_id: self.driver_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    fn pager_params(&self, values: &FilterValues) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", values.from.clone()),
            ("to", values.to.clone()),
            ("driver_id", values.driver_id.clone()),
        ];
        if let Some(size) = self.page_size {
            params.push(("page_size", size.to_string()));
        }
        params
    }
}

pub struct PaymentRow {
    pub driver_id: i64,
    pub driver_name: String,
    pub period: String,
    pub gross: String,
    pub deductions: String,
    pub net: String,
}

impl From<&PaymentRecord> for PaymentRow {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            driver_id: record.driver_id,
            driver_name: record.driver_name.clone(),
            period: format!("{} to {}", record.period_start, record.period_end),
            gross: format_amount(record.gross_amount, &record.currency),
            deductions: format_amount(record.deductions, &record.currency),
            net: format_amount(record.net_amount, &record.currency),
        }
    }
}

pub struct TripRow {
    pub driver_id: i64,
    pub driver_name: String,
    pub company: String,
    pub date: String,
    pub trips: u32,
    pub distance: String,
    pub revenue: String,
}

impl From<&TripRecord> for TripRow {
    fn from(record: &TripRecord) -> Self {
        Self {
            driver_id: record.driver_id,
            driver_name: record.driver_name.clone(),
            company: record
                .company_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            date: record.trip_date.to_string(),
            trips: record.trips,
            distance: format!("{:.1} km", record.distance_km),
            revenue: format!("{:.2}", record.revenue),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "records/payments.html")]
struct PaymentsTemplate {
    rows: Vec<PaymentRow>,
    pager: Pager,
    filter: FilterValues,
}

#[derive(Template, WebTemplate)]
#[template(path = "records/trips.html")]
struct TripsTemplate {
    rows: Vec<TripRow>,
    pager: Pager,
    filter: FilterValues,
}

/// Payroll rows.
///
/// # Endpoint
///
/// `GET /dashboard/records/payments?from=&to=&driver_id=&page=`
///
/// A `from` after `to` renders a `400` page.
pub async fn payments_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, WebError> {
    let filter = query.to_filter(state.settings.default_page_size)?;
    let values = query.values(&filter);
    let page = state.record_service.payments(&token, filter).await?;

    Ok(PaymentsTemplate {
        rows: page.items.iter().map(PaymentRow::from).collect(),
        pager: Pager::new(&page, "/dashboard/records/payments", &query.pager_params(&values)),
        filter: values,
    })
}

/// Trip rows.
///
/// # Endpoint
///
/// `GET /dashboard/records/trips?from=&to=&driver_id=&page=`
pub async fn trips_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, WebError> {
    let filter = query.to_filter(state.settings.default_page_size)?;
    let values = query.values(&filter);
    let page = state.record_service.trips(&token, filter).await?;

    Ok(TripsTemplate {
        rows: page.items.iter().map(TripRow::from).collect(),
        pager: Pager::new(&page, "/dashboard/records/trips", &query.pager_params(&values)),
        filter: values,
    })
}
