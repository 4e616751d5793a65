//! Get-or-fetch helper for caching backend query results.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use super::service::CacheService;
use crate::domain::entities::AccessToken;
use crate::error::AppError;

/// Cache namespaces. Mutations drop a whole namespace for every user.
pub mod namespace {
    pub const DRIVERS: &str = "drivers:";
    pub const DOCUMENTS: &str = "documents:";
    pub const RECORDS: &str = "records:";
    pub const IMPORTS: &str = "imports:";
    pub const ANALYTICS: &str = "analytics:";
}

/// Builds a cache key scoped to the caller, e.g. `drivers:3fa9c1d2e4b5a607:list:p1`.
pub fn user_key(namespace: &str, token: &AccessToken, suffix: &str) -> String {
    format!("{namespace}{}:{suffix}", token.fingerprint())
}

/// Returns the cached value for `key`, or runs `fetch` and caches its result.
///
/// Values are stored as JSON. Undecodable entries count as misses, and a
/// failing `fetch` is never cached.
pub async fn cached<T, F, Fut>(cache: &dyn CacheService, key: &str, fetch: F) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if let Ok(Some(raw)) = cache.get(key).await {
        match serde_json::from_str(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
        }
    }

    let value = fetch().await?;

    match serde_json::to_string(&value) {
        Ok(raw) => {
            let _ = cache.set(key, &raw, None).await;
        }
        Err(e) => warn!(key, error = %e, "Failed to encode value for cache"),
    }

    Ok(value)
}

/// Drops a cache namespace, logging instead of failing.
pub async fn invalidate(cache: &dyn CacheService, prefix: &str) {
    if let Err(e) = cache.invalidate_prefix(prefix).await {
        warn!(prefix, error = %e, "Failed to invalidate cache");
    }
}
