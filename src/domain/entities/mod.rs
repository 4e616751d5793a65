//! Core domain entities representing the fleet data model.
//!
//! Entities mirror the JSON shapes served by the fleet backend and derive
//! Serde traits accordingly. Creation and update inputs are separate types
//! carrying `validator` rules:
//!
//! - [`Driver`] / [`NewDriver`] / [`DriverPatch`]
//! - [`DriverDocument`] / [`NewDocument`] / [`DocumentPatch`]
//! - [`PaymentRecord`], [`TripRecord`] - rows ingested from data files
//! - [`FileImport`] / [`UploadFile`] - data file uploads
//! - [`DashboardSummary`], [`ChartSlice`], [`SeriesPoint`] - analytics
//! - [`AccessToken`] / [`Credentials`] - session

pub mod analytics;
pub mod document;
pub mod driver;
pub mod import;
pub mod record;
pub mod session;

pub use analytics::{ChartSlice, DashboardSummary, DateRange, SeriesPoint};
pub use document::{ComplianceReport, DocumentKind, DocumentPatch, DocumentView, DriverDocument, NewDocument};
pub use driver::{Company, Driver, DriverFilter, DriverPatch, DriverStatus, NewDriver};
pub use import::{FileImport, ImportKind, ImportStatus, UploadFile};
pub use record::{PaymentRecord, RecordFilter, TripRecord};
pub use session::{AccessToken, Credentials};
