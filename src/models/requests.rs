//! Request DTOs for the recipe API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::RecipeError;

/// Request body for POST /recipes and PUT /recipes/:id
///
/// Missing fields bind to empty values. Any `id` or `published_at` sent by
/// the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecipeInput {
    pub name: String,
    pub instructions: Vec<String>,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
}

impl RecipeInput {
    /// Decodes a request body. Unparseable or wrongly typed JSON is a client input error.
    pub fn from_json(body: &[u8]) -> Result<Self, RecipeError> {
        serde_json::from_slice(body)
            .map_err(|e| RecipeError::ClientInput(format!("Invalid recipe body: {}", e)))
    }
}

/// Query string for GET /recipes/search
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Exact tag to match; absent means the empty tag
    pub tag: String,
}

impl SearchQuery {
    /// Builds the query from decoded pairs, keeping the first `tag` value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let tag = pairs
            .into_iter()
            .find(|(key, _)| key == "tag")
            .map(|(_, value)| value)
            .unwrap_or_default();
        Self { tag }
    }
}
