//! Payroll and trip rows ingested from uploaded data files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::DateRange;
use crate::domain::pagination::PageRequest;

/// One payroll line for a driver over a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_amount: f64,
    #[serde(default)]
    pub deductions: f64,
    pub net_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub import_id: Option<i64>,
}

/// Aggregated trips driven by a driver on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    pub trip_date: NaiveDate,
    pub trips: u32,
    pub distance_km: f64,
    pub revenue: f64,
    #[serde(default)]
    pub import_id: Option<i64>,
}

/// Filters shared by the payment and trip browsers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub page: PageRequest,
    pub driver_id: Option<i64>,
    pub range: Option<DateRange>,
}

impl RecordFilter {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn with_driver(mut self, driver_id: Option<i64>) -> Self {
        self.driver_id = driver_id;
        self
    }

    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }

    pub fn cache_key(&self) -> String {
        let range = self
            .range
            .map(|r| format!("{}_{}", r.from, r.to))
            .unwrap_or_default();
        format!(
            "p{}:s{}:d{}:r{}",
            self.page.page,
            self.page.page_size,
            self.driver_id.map(|d| d.to_string()).unwrap_or_default(),
            range
        )
    }
}
