//! Web dashboard layer for browser-based UI.
//!
//! Server-rendered pages for drivers, their documents, payroll and trip
//! records and data file imports. Uses Askama templates; every page reads
//! through the application services with the token from the session cookie.
//!
//! # Modules
//!
//! - [`error`] - Error pages and the login redirect
//! - [`forms`] - Form payloads and their parsing
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session cookie check
//! - [`pager`] - Page controls preserving query filters
//! - [`routes`] - Dashboard route configuration
//! - [`session`] - Cookie helpers

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod pager;
pub mod routes;
pub mod session;
