//! # Fleet Admin
//!
//! Administration dashboard for a driver fleet, built with Axum and Askama.
//!
//! The dashboard owns no data: drivers, documents, payroll and trip records,
//! imports and analytics all live in the fleet REST backend. This crate logs
//! administrators in against that backend, keeps their bearer token in a
//! signed cookie, and forwards every operation with it.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, pagination and expiry logic, repository traits
//! - **Application Layer** ([`application`]) - Validation, caching and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Backend HTTP client and query cache
//! - **API Layer** ([`api`]) - JSON endpoints for charts and pagers
//! - **Web Layer** ([`web`]) - HTML dashboard
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="https://fleet-api.example.com/v1"
//! export SESSION_SECRET="change-me-to-something-long"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! The `fleetctl` binary talks to the same backend from a terminal.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalyticsService, AuthService, DocumentService, DriverService, ImportService,
        RecordService, SessionSigner,
    };
    pub use crate::domain::entities::{AccessToken, Driver, DriverDocument, FileImport};
    pub use crate::domain::pagination::{Page, PageItem, PageRequest, generate_pagination_pages};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, Repositories, UiSettings};
}
