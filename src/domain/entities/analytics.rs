//! Dashboard analytics: summary cards, chart slices and time series.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Longest date range accepted by the analytics endpoints, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting reversed bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, AppError> {
        if from > to {
            return Err(AppError::bad_request(
                "Start date must not be after end date",
                json!({ "from": from, "to": to }),
            ));
        }
        Ok(Self { from, to })
    }

    /// The `days` days ending with `today` (inclusive).
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(today);
        Self { from, to: today }
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from.iter_days().take_while(move |d| *d <= self.to)
    }
}

/// Figures shown in the dashboard summary cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_drivers: u64,
    pub active_drivers: u64,
    pub expiring_documents: u64,
    pub expired_documents: u64,
    pub trips_this_month: u64,
    pub payouts_this_month: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total in percent, filled in by the analytics service.
    #[serde(default)]
    pub share: f64,
}

/// One point of a daily time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}
