//! DTOs for the page-control endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::pagination::PageItem;

/// `?page=&total_pages=` query.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PagerQuery {
    #[serde_as(as = "DisplayFromStr")]
    pub page: u32,

    #[serde_as(as = "DisplayFromStr")]
    pub total_pages: u32,
}

/// Page controls to render, in display order.
///
/// ```json
/// {
///   "current_page": 5,
///   "total_pages": 10,
///   "items": [{"page": 1}, {"ellipsis": true}, {"page": 4}, {"page": 5},
///             {"page": 6}, {"ellipsis": true}, {"page": 10}]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct PagerResponse {
    pub current_page: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
}
