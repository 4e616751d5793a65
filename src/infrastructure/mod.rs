//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer and provides
//! the query cache.
//!
//! # Modules
//!
//! - [`backend`] - HTTP adapters for the fleet REST backend
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)

pub mod backend;
pub mod cache;
