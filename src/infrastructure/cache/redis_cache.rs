//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for short-lived backend responses.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set`] is called
    ///   without one; controlled via `CACHE_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "fleet:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Collects keys matching `pattern` with incremental `SCAN`.
    async fn matching_keys(&self, pattern: &str) -> redis::RedisResult<Vec<String>> {
        let mut conn = self.client.clone();
        let mut iter = conn.scan_match::<_, String>(pattern).await?;
        let mut keys = Vec::new();
        while let Some(key) = iter.next_item().await {
            keys.push(key?);
        }
        Ok(keys)
    }
}

/// Keys removed per `DEL` call during invalidation.
const DELETE_BATCH: usize = 500;

/// `SCAN MATCH` pattern for every key starting with `prefix`.
///
/// Glob metacharacters in the prefix are escaped so they match literally.
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(value)) => {
                debug!(key, "Cache HIT");
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(key, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(key, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(&full_key, value, ttl).await {
            Ok(_) => {
                debug!(key, ttl, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(key, error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn invalidate_prefix(&self, prefix: &str) -> CacheResult<()> {
        let pattern = scan_pattern(&self.build_key(prefix));
        let mut conn = self.client.clone();

        let keys = match self.matching_keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(prefix, error = %e, "Redis SCAN error");
                return Ok(());
            }
        };

        let mut deleted = 0;
        for batch in keys.chunks(DELETE_BATCH) {
            match conn.del::<_, i64>(batch).await {
                Ok(n) => deleted += n,
                Err(e) => {
                    warn!(prefix, error = %e, "Redis DEL error");
                    return Ok(());
                }
            }
        }
        debug!(prefix, deleted, "Cache INVALIDATE");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
