//! Cache-Aside Protocol
//!
//! Read the snapshot, populate it after a miss, invalidate it after a write.
//! A list racing a write may repopulate from a read that predates the write;
//! the next write clears it again.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::RecipeCache;
use crate::error::Result;
use crate::models::Recipe;

// == Cache Aside ==
/// Wraps a cache backend with the snapshot protocol for one key.
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<dyn RecipeCache>,
    key: &'static str,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn RecipeCache>, key: &'static str) -> Self {
        Self { cache, key }
    }

    // == Read ==
    /// Looks up the snapshot.
    ///
    /// Backend failures are returned. A snapshot that no longer decodes is
    /// reported as a miss so the caller refreshes it.
    pub async fn read(&self) -> Result<Option<Vec<Recipe>>> {
        let Some(raw) = self.cache.get(self.key).await? else {
            info!("Cache miss for '{}', querying the store", self.key);
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(recipes) => {
                info!("Cache hit for '{}'", self.key);
                Ok(Some(recipes))
            }
            Err(e) => {
                warn!("Discarding undecodable snapshot under '{}': {}", self.key, e);
                Ok(None)
            }
        }
    }

    // == Populate ==
    /// Writes a fresh snapshot with no expiration. Failures are only logged.
    pub async fn populate(&self, recipes: &[Recipe]) {
        let data = match serde_json::to_string(recipes) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize recipe snapshot: {}", e);
                return;
            }
        };

        match self.cache.set(self.key, data).await {
            Ok(()) => info!("Cached {} recipes under '{}'", recipes.len(), self.key),
            Err(e) => warn!("Failed to write '{}' to cache: {}", self.key, e),
        }
    }

    // == Invalidate ==
    /// Removes the snapshot after a write. Failures are only logged.
    pub async fn invalidate(&self) {
        match self.cache.delete(self.key).await {
            Ok(()) => info!("Invalidated cached '{}'", self.key),
            Err(e) => warn!("Failed to invalidate cached '{}': {}", self.key, e),
        }
    }
}
