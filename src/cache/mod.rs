//! Cache Module
//!
//! Key-value cache holding the serialized recipe list snapshot.
//!
//! # Backends
//! - `RedisCache` - shared Redis instance
//! - `MemoryCache` - in-process map for development and tests

mod memory;
mod redis_backend;
mod stats;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use self::memory::MemoryCache;
pub use self::redis_backend::RedisCache;
pub use self::stats::CacheStats;

// == Public Constants ==
/// Key under which the full recipe list snapshot is stored
pub const RECIPES_KEY: &str = "recipes";

// == Recipe Cache Trait ==
/// Get, set and delete by key. Entries never expire on their own.
#[async_trait]
pub trait RecipeCache: Send + Sync {
    /// Returns `Ok(None)` on a miss; backend failures are errors.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key` with no expiration.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
