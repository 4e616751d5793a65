//! Application layer services implementing business logic.
//!
//! Services validate input, normalize it, call the repository traits and
//! manage the query cache. Handlers (JSON and HTML) and the CLI talk only to
//! services.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, logout and session sealing
//! - [`services::driver_service::DriverService`] - Driver browsing and editing
//! - [`services::document_service::DocumentService`] - Documents and expiry compliance
//! - [`services::record_service::RecordService`] - Payment and trip rows
//! - [`services::import_service::ImportService`] - Data file uploads
//! - [`services::analytics_service::AnalyticsService`] - Dashboard charts

pub mod services;
