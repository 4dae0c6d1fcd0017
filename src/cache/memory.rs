//! In-Memory Cache Backend
//!
//! HashMap storage with hit/miss accounting, shared behind a `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, RecipeCache};
use crate::error::Result;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    stats: CacheStats,
}

// == Memory Cache ==
/// Process-local recipe cache.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats.clone()
    }

    /// Returns true if `key` currently holds a value.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.read().await.entries.contains_key(key)
    }
}

#[async_trait]
impl RecipeCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: lookups update the stats.
        let mut inner = self.inner.write().await;
        let value = inner.entries.get(key).cloned();
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        debug!(
            "memory cache '{}': hits={}, misses={}, hit_rate={:.2}",
            key,
            inner.stats.hits,
            inner.stats.misses,
            inner.stats.hit_rate()
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.entries.insert(key.to_string(), value);
        inner.stats.record_write();
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.entries.remove(key).is_some() {
            inner.stats.record_invalidation();
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_miss_is_none() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("recipes").await.unwrap(), None);

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("recipes", "[]".to_string()).await.unwrap();

        assert_eq!(cache.get("recipes").await.unwrap().as_deref(), Some("[]"));
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.writes, 1);
        assert!((stats.hit_rate() - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let cache = MemoryCache::new();
        cache.set("k", "v1".to_string()).await.unwrap();
        cache.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let cache = MemoryCache::new();
        cache.delete("missing").await.unwrap();
        assert_eq!(cache.stats().await.invalidations, 0);

        cache.set("k", "v".to_string()).await.unwrap();
        cache.delete("k").await.unwrap();
        assert!(!cache.contains("k").await);
        assert_eq!(cache.stats().await.invalidations, 1);
    }
}
