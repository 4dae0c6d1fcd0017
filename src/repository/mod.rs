//! Recipe Repository
//!
//! Translates list, create, update, delete and tag search into store and
//! cache calls. Owns cache population and invalidation.

mod cache_aside;


use std::sync::Arc;

use tracing::debug;

use crate::cache::{RecipeCache, RECIPES_KEY};
use crate::error::{ErrorMode, Result};
use crate::models::{Recipe, RecipeId, RecipeInput};
use crate::store::RecipeStore;

pub use cache_aside::CacheAside;

// == Recipe Repository ==
/// Mediates all access to persisted recipes.
///
/// Cheap to clone; the store and cache handles are shared.
#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
    cache: Option<CacheAside>,
    mode: ErrorMode,
}

impl RecipeRepository {
    /// Creates a repository without caching.
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self {
            store,
            cache: None,
            mode: ErrorMode::default(),
        }
    }

    /// Enables cache-aside reads of the full list through `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn RecipeCache>) -> Self {
        self.cache = Some(CacheAside::new(cache, RECIPES_KEY));
        self
    }

    /// Sets how malformed identifiers are handled.
    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache.is_some()
    }

    // == List ==
    /// Returns every recipe, from the cached snapshot when possible.
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        let Some(cache) = &self.cache else {
            return self.store.find_all().await;
        };

        if let Some(recipes) = cache.read().await? {
            return Ok(recipes);
        }

        let recipes = self.store.find_all().await?;
        cache.populate(&recipes).await;
        Ok(recipes)
    }

    // == Create ==
    /// Stores a new recipe with a fresh id and timestamp.
    pub async fn create(&self, input: RecipeInput) -> Result<Recipe> {
        let recipe = Recipe::publish(input);
        self.store.insert(&recipe).await?;
        debug!("Inserted recipe {}", recipe.id);

        self.invalidate().await;
        Ok(recipe)
    }

    // == Update ==
    /// Overwrites the editable fields of the recipe with `raw_id`.
    ///
    /// Succeeds whether or not a record matched.
    pub async fn update(&self, raw_id: &str, input: RecipeInput) -> Result<()> {
        let id = self.parse_id(raw_id)?;
        let matched = self.store.update(id, input).await?;
        debug!("Updated recipe {} (matched {})", id, matched);

        self.invalidate().await;
        Ok(())
    }

    // == Delete ==
    /// Removes the recipe with `raw_id`.
    ///
    /// Succeeds whether or not a record matched.
    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        let id = self.parse_id(raw_id)?;
        let deleted = self.store.delete(id).await?;
        debug!("Deleted recipe {} (removed {})", id, deleted);

        self.invalidate().await;
        Ok(())
    }

    // == Search By Tag ==
    /// Returns recipes tagged exactly `tag`, bypassing the cache.
    pub async fn search_by_tag(&self, tag: &str) -> Result<Vec<Recipe>> {
        self.store.find_by_tag(tag).await
    }

    async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate().await;
        }
    }

    fn parse_id(&self, raw_id: &str) -> Result<RecipeId> {
        match self.mode {
            ErrorMode::Strict => RecipeId::parse(raw_id),
            ErrorMode::Compatible => {
                let id = RecipeId::parse_or_zero(raw_id);
                if id == RecipeId::zero() {
                    debug!("Recipe id '{}' did not parse, matching nothing", raw_id);
                }
                Ok(id)
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::RecipeError;
    use crate::store::MemoryStore;

    fn input(name: &str, tags: &[&str]) -> RecipeInput {
        RecipeInput {
            name: name.to_string(),
            instructions: vec![format!("make {}", name)],
            ingredients: vec![format!("{} base", name)],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn cached_repo() -> (RecipeRepository, MemoryStore, MemoryCache) {
        let store = MemoryStore::new();
        let cache = MemoryCache::new();
        let repo = RecipeRepository::new(Arc::new(store.clone())).with_cache(Arc::new(cache.clone()));
        (repo, store, cache)
    }

    #[tokio::test]
    async fn test_list_without_cache_reads_store() {
        let store = MemoryStore::new();
        let repo = RecipeRepository::new(Arc::new(store.clone()));
        assert!(!repo.caching_enabled());

        repo.create(input("soup", &[])).await.unwrap();
        let recipes = repo.list().await.unwrap();
        assert_eq!(recipes.len(), 1);
    }

    #[tokio::test]
    async fn test_list_populates_then_hits_cache() {
        let (repo, _store, cache) = cached_repo();
        repo.create(input("soup", &[])).await.unwrap();

        let first = repo.list().await.unwrap();
        assert!(cache.contains(RECIPES_KEY).await);
        let second = repo.list().await.unwrap();

        assert_eq!(first, second);
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_create_invalidates_snapshot() {
        let (repo, _store, cache) = cached_repo();
        repo.list().await.unwrap();
        assert!(cache.contains(RECIPES_KEY).await);

        let created = repo.create(input("cake", &["dessert"])).await.unwrap();
        assert!(!cache.contains(RECIPES_KEY).await);

        let recipes = repo.list().await.unwrap();
        assert_eq!(recipes, vec![created]);
    }

    #[tokio::test]
    async fn test_update_overwrites_and_invalidates() {
        let (repo, _store, cache) = cached_repo();
        let created = repo.create(input("cake", &["dessert"])).await.unwrap();
        repo.list().await.unwrap();

        repo.update(&created.id.to_string(), input("tart", &["dessert", "fruit"]))
            .await
            .unwrap();
        assert!(!cache.contains(RECIPES_KEY).await);

        let recipes = repo.list().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, created.id);
        assert_eq!(recipes[0].published_at, created.published_at);
        assert_eq!(recipes[0].name, "tart");
        assert_eq!(recipes[0].tags, vec!["dessert", "fruit"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_succeeds() {
        let (repo, store, _cache) = cached_repo();
        let result = repo
            .update(&RecipeId::generate().to_string(), input("ghost", &[]))
            .await;
        assert!(result.is_ok());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_and_invalidates() {
        let (repo, store, cache) = cached_repo();
        let created = repo.create(input("soup", &[])).await.unwrap();
        repo.list().await.unwrap();

        repo.delete(&created.id.to_string()).await.unwrap();
        assert!(store.is_empty().await);
        assert!(!cache.contains(RECIPES_KEY).await);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_id_compatible_matches_nothing() {
        let (repo, store, _cache) = cached_repo();
        repo.create(input("soup", &[])).await.unwrap();

        repo.update("garbage", input("stew", &[])).await.unwrap();
        repo.delete("garbage").await.unwrap();

        let recipes = store.find_all().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "soup");
    }

    #[tokio::test]
    async fn test_malformed_id_strict_is_rejected() {
        let store = MemoryStore::new();
        let repo = RecipeRepository::new(Arc::new(store)).with_mode(ErrorMode::Strict);

        let result = repo.delete("garbage").await;
        assert!(matches!(result, Err(RecipeError::ClientInput(_))));
        let result = repo.update("garbage", input("x", &[])).await;
        assert!(matches!(result, Err(RecipeError::ClientInput(_))));
    }

    #[tokio::test]
    async fn test_search_by_tag_bypasses_cache() {
        let (repo, _store, cache) = cached_repo();
        repo.create(input("cake", &["dessert"])).await.unwrap();
        repo.create(input("soup", &["main"])).await.unwrap();

        let found = repo.search_by_tag("dessert").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "cake");
        assert!(repo.search_by_tag("drink").await.unwrap().is_empty());

        let stats = cache.stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
    }
}
