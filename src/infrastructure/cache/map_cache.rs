//! In-process cache for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::service::{CacheResult, CacheService};

/// Unbounded map ignoring TTLs.
#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MapCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheService for MapCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .retain(|k, _| !k.starts_with(prefix));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "map"
    }
}
