//! Pagination and filtering query parameters.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::pagination::PageRequest;

/// Pagination query parameters.
///
/// Query strings arrive as text, and HTML forms submit blank fields as empty
/// strings; `NoneAsEmptyString` parses the former and maps the latter to `None`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Converts to a page request, filling in defaults.
    ///
    /// Page `0` is treated as page 1; the page size is clamped later by the
    /// services.
    pub fn to_request(&self, default_page_size: u32) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }
}

/// Optional `from`/`to` day bounds in `YYYY-MM-DD` form.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct DateFilterParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub from: Option<NaiveDate>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub to: Option<NaiveDate>,
}
