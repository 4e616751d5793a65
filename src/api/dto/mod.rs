//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Query
//! parameters go through `serde_with` so numbers and dates parse from text.

pub mod analytics;
pub mod health;
pub mod pager;
pub mod pagination;
