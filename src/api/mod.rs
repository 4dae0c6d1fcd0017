//! API Module
//!
//! HTTP handlers and routing for the recipe REST API.
//!
//! # Endpoints
//! - `GET /recipes` - List every recipe
//! - `POST /recipes` - Create a recipe
//! - `PUT /recipes/:id` - Overwrite a recipe
//! - `DELETE /recipes/:id` - Delete a recipe
//! - `GET /recipes/search?tag=` - Recipes carrying a tag
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
