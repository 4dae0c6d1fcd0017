//! Recipe record and its identifier

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RecipeError;
use crate::models::RecipeInput;

// == Recipe Id ==
/// Store-native recipe identifier, rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(ObjectId);

impl RecipeId {
    /// Generates a fresh, globally unique identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses a hex identifier, rejecting anything malformed.
    pub fn parse(raw: &str) -> Result<Self, RecipeError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|e| RecipeError::ClientInput(format!("Invalid recipe id '{}': {}", raw, e)))
    }

    /// Parses a hex identifier, falling back to the all-zero id on failure.
    ///
    /// The zero id is never generated, so a filter on it matches nothing.
    pub fn parse_or_zero(raw: &str) -> Self {
        ObjectId::parse_str(raw)
            .map(Self)
            .unwrap_or_else(|_| Self::zero())
    }

    /// The all-zero identifier.
    pub fn zero() -> Self {
        Self(ObjectId::from_bytes([0; 12]))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for RecipeId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::parse_str(&raw)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

// == Recipe ==
/// A stored recipe.
///
/// `id` and `published_at` are assigned once at creation and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub instructions: Vec<String>,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a new record from client input, assigning id and timestamp.
    ///
    /// The timestamp is truncated to milliseconds, the precision the store keeps.
    pub fn publish(input: RecipeInput) -> Self {
        Self {
            id: RecipeId::generate(),
            name: input.name,
            instructions: input.instructions,
            ingredients: input.ingredients,
            tags: input.tags,
            published_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Overwrites every client-editable field, keeping id and timestamp.
    pub fn apply(&mut self, input: RecipeInput) {
        self.name = input.name;
        self.instructions = input.instructions;
        self.ingredients = input.ingredients;
        self.tags = input.tags;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
