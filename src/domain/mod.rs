//! Domain layer containing business entities and logic.
//!
//! The domain layer has no dependencies on the HTTP client, cache or
//! presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Fleet data structures (drivers, documents, records, imports)
//! - [`repositories`] - Data access trait definitions
//! - [`pagination`] - Page windows for pager controls and paginated results
//! - [`expiry`] - Document expiry checks

pub mod entities;
pub mod expiry;
pub mod pagination;
pub mod repositories;
