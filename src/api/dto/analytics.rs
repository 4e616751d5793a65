//! DTOs for chart endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::DateRange;

/// Chart data together with the range it covers.
#[derive(Debug, Serialize)]
pub struct ChartResponse<T> {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub data: Vec<T>,
}

impl<T> ChartResponse<T> {
    pub fn new(range: DateRange, data: Vec<T>) -> Self {
        Self {
            from: range.from,
            to: range.to,
            data,
        }
    }
}
