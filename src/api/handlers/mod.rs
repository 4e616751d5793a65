//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod pager;

pub use analytics::{summary_handler, trips_by_company_handler, trips_over_time_handler};
pub use health::health_handler;
pub use pager::pager_handler;
