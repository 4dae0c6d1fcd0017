//! MongoDB Store
//!
//! Maps `Recipe` onto BSON documents keyed by `_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document},
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{Recipe, RecipeId, RecipeInput};
use crate::store::{RecipeStore, COLLECTION_NAME};

// == Recipe Document ==
/// On-disk shape of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecipeDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    instructions: Vec<String>,
    ingredients: Vec<String>,
    tags: Vec<String>,
    published_at: BsonDateTime,
}

impl From<&Recipe> for RecipeDocument {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.as_object_id(),
            name: recipe.name.clone(),
            instructions: recipe.instructions.clone(),
            ingredients: recipe.ingredients.clone(),
            tags: recipe.tags.clone(),
            published_at: BsonDateTime::from_millis(recipe.published_at.timestamp_millis()),
        }
    }
}

impl From<RecipeDocument> for Recipe {
    fn from(doc: RecipeDocument) -> Self {
        Self {
            id: RecipeId::from(doc.id),
            name: doc.name,
            instructions: doc.instructions,
            ingredients: doc.ingredients,
            tags: doc.tags,
            published_at: DateTime::<Utc>::from_timestamp_millis(doc.published_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

// == Mongo Store ==
/// Recipe store backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    collection: Collection<RecipeDocument>,
}

impl MongoStore {
    /// Connects to MongoDB and selects the `recipes` collection of `db_name`.
    ///
    /// The driver connects lazily; call [`RecipeStore::ping`] to verify.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(db_name);
        let collection = database.collection::<RecipeDocument>(COLLECTION_NAME);

        Ok(Self {
            database,
            collection,
        })
    }

    async fn find(&self, filter: Document) -> Result<Vec<Recipe>> {
        let cursor = self.collection.find(filter).await?;
        let docs: Vec<RecipeDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Recipe::from).collect())
    }
}

#[async_trait]
impl RecipeStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Recipe>> {
        self.find(doc! {}).await
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>> {
        // Equality against an array field matches any element.
        self.find(doc! { "tags": tag }).await
    }

    async fn insert(&self, recipe: &Recipe) -> Result<()> {
        self.collection
            .insert_one(RecipeDocument::from(recipe))
            .await?;
        Ok(())
    }

    async fn update(&self, id: RecipeId, input: RecipeInput) -> Result<u64> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! {
                    "$set": {
                        "name": input.name,
                        "instructions": input.instructions,
                        "ingredients": input.ingredients,
                        "tags": input.tags,
                    }
                },
            )
            .await?;

        debug!(
            "update {}: matched={}, modified={}",
            id, result.matched_count, result.modified_count
        );
        Ok(result.matched_count)
    }

    async fn delete(&self, id: RecipeId) -> Result<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeInput;

    #[test]
    fn test_document_conversion_preserves_fields() {
        let recipe = Recipe::publish(RecipeInput {
            name: "Tea".to_string(),
            instructions: vec!["Boil water".to_string()],
            ingredients: vec!["water".to_string()],
            tags: vec!["drink".to_string()],
        });

        let back = Recipe::from(RecipeDocument::from(&recipe));
        assert_eq!(back, recipe);
    }

    #[test]
    fn test_document_uses_underscore_id() {
        let recipe = Recipe::publish(RecipeInput {
            name: "Tea".to_string(),
            instructions: vec![],
            ingredients: vec![],
            tags: vec![],
        });

        let doc = mongodb::bson::to_document(&RecipeDocument::from(&recipe)).unwrap();
        assert_eq!(doc.get_object_id("_id").unwrap(), recipe.id.as_object_id());
        assert!(doc.get_datetime("published_at").is_ok());
    }
}
