//! Short-lived cache for backend query results.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache shared across dashboard instances
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! [`cached`] wraps a backend call with get-or-fetch semantics.

#[cfg(test)]
mod map_cache;
mod null_cache;
mod query;
mod redis_cache;
mod service;

#[cfg(test)]
pub use map_cache::MapCache;
pub use null_cache::NullCache;
pub use query::{cached, invalidate, namespace, user_key};
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
