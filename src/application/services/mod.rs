//! Business logic services for the application layer.

pub mod analytics_service;
pub mod auth_service;
pub mod document_service;
pub mod driver_service;
pub mod import_service;
pub mod record_service;

pub use analytics_service::AnalyticsService;
pub use auth_service::{AuthService, SessionSigner};
pub use document_service::DocumentService;
pub use driver_service::DriverService;
pub use import_service::ImportService;
pub use record_service::RecordService;
