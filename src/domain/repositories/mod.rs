//! Repository trait definitions for the domain layer.
//!
//! Every data operation of the dashboard is a call to the remote fleet
//! backend. These traits abstract those calls so services can be tested
//! without a backend.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::backend`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AuthRepository`] / [`BackendHealth`] - Login, logout and health
//! - [`DriverRepository`] - Drivers and companies
//! - [`DocumentRepository`] - Driver compliance documents
//! - [`RecordRepository`] - Payroll and trip rows
//! - [`ImportRepository`] - Data file uploads
//! - [`AnalyticsRepository`] - Dashboard figures and charts

pub mod analytics_repository;
pub mod auth_repository;
pub mod document_repository;
pub mod driver_repository;
pub mod import_repository;
pub mod record_repository;

pub use analytics_repository::AnalyticsRepository;
pub use auth_repository::{AuthRepository, BackendHealth};
pub use document_repository::DocumentRepository;
pub use driver_repository::DriverRepository;
pub use import_repository::ImportRepository;
pub use record_repository::RecordRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use auth_repository::{MockAuthRepository, MockBackendHealth};
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use driver_repository::MockDriverRepository;
#[cfg(test)]
pub use import_repository::MockImportRepository;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
