//! REST backend adapters.
//!
//! The dashboard owns no data. Every repository trait is implemented by
//! forwarding the caller's bearer token to the fleet backend through a shared
//! [`BackendClient`].
//!
//! # Repositories
//!
//! - [`HttpAuthRepository`] - login and logout
//! - [`HttpDriverRepository`] - drivers and companies
//! - [`HttpDocumentRepository`] - driver documents
//! - [`HttpRecordRepository`] - payment and trip rows
//! - [`HttpImportRepository`] - data file uploads
//! - [`HttpAnalyticsRepository`] - dashboard aggregates

pub mod analytics;
pub mod auth;
pub mod client;
pub mod documents;
pub mod drivers;
pub mod imports;
pub mod records;

pub use analytics::HttpAnalyticsRepository;
pub use auth::HttpAuthRepository;
pub use client::{BackendClient, BackendError};
pub use documents::HttpDocumentRepository;
pub use drivers::HttpDriverRepository;
pub use imports::HttpImportRepository;
pub use records::HttpRecordRepository;
