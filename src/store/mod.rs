//! Recipe Store Module
//!
//! Document-store access behind the `RecipeStore` trait.
//!
//! # Backends
//! - `MongoStore` - MongoDB collection `recipes`
//! - `MemoryStore` - in-process store for development and tests

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Recipe, RecipeId, RecipeInput};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Name of the collection holding recipe documents
pub const COLLECTION_NAME: &str = "recipes";

// == Recipe Store Trait ==
/// Filtered find, insert-one, update-one and delete-one over recipe records.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Returns every record in store iteration order.
    async fn find_all(&self) -> Result<Vec<Recipe>>;

    /// Returns records whose tags contain exactly `tag`.
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>>;

    /// Inserts a fully formed record.
    async fn insert(&self, recipe: &Recipe) -> Result<()>;

    /// Overwrites the editable fields of the record with `id`.
    ///
    /// Returns the number of matched records.
    async fn update(&self, id: RecipeId, input: RecipeInput) -> Result<u64>;

    /// Removes the record with `id`, returning the number deleted.
    async fn delete(&self, id: RecipeId) -> Result<u64>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
