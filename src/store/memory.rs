//! In-Memory Store
//!
//! Keeps recipes in insertion order behind a `tokio::sync::RwLock`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Recipe, RecipeId, RecipeInput};
use crate::store::RecipeStore;

// == Memory Store ==
/// Recipe store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Recipe>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Recipe>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.has_tag(tag)).cloned().collect())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<()> {
        self.records.write().await.push(recipe.clone());
        Ok(())
    }

    async fn update(&self, id: RecipeId, input: RecipeInput) -> Result<u64> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply(input);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: RecipeId) -> Result<u64> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, tags: &[&str]) -> RecipeInput {
        RecipeInput {
            name: name.to_string(),
            instructions: vec![],
            ingredients: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_all_in_order() {
        let store = MemoryStore::new();
        let a = Recipe::publish(input("a", &[]));
        let b = Recipe::publish(input("b", &[]));
        store.insert(&a).await.unwrap();
        store.insert(&b).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_find_by_tag_is_exact() {
        let store = MemoryStore::new();
        store.insert(&Recipe::publish(input("cake", &["dessert"]))).await.unwrap();
        store.insert(&Recipe::publish(input("pie", &["desserts"]))).await.unwrap();

        let found = store.find_by_tag("dessert").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "cake");
        assert!(store.find_by_tag("soup").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_matches_nothing() {
        let store = MemoryStore::new();
        let matched = store.update(RecipeId::generate(), input("x", &[])).await.unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_existing() {
        let store = MemoryStore::new();
        let recipe = Recipe::publish(input("soup", &[]));
        store.insert(&recipe).await.unwrap();

        assert_eq!(store.update(recipe.id, input("stew", &["hot"])).await.unwrap(), 1);
        let all = store.find_all().await.unwrap();
        assert_eq!(all[0].name, "stew");
        assert_eq!(all[0].published_at, recipe.published_at);

        assert_eq!(store.delete(recipe.id).await.unwrap(), 1);
        assert_eq!(store.delete(recipe.id).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }
}
