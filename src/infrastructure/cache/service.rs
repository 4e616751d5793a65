//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching serialized backend responses.
///
/// Keys are namespaced (`drivers:…`, `records:…`, `analytics:…`) so a
/// mutation can drop a whole namespace with [`CacheService::invalidate_prefix`].
/// Implementations must be thread-safe and fail open: a cache failure degrades
/// to a backend call, never to a user-facing error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with optional TTL in seconds (implementation default if `None`).
    ///
    /// Should not propagate errors to callers.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Used after mutations so stale listings are not served.
    async fn invalidate_prefix(&self, prefix: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reports.
    fn name(&self) -> &'static str;
}
