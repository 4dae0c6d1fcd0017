//! Request and Response models for the recipe service
//!
//! This module defines the domain record plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod recipe;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use recipe::{Recipe, RecipeId};
pub use requests::{RecipeInput, SearchQuery};
pub use responses::{ErrorResponse, HealthResponse, MessageResponse};
