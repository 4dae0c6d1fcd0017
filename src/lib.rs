//! Recipe API - CRUD and tag search over recipe documents
//!
//! MongoDB-backed with an optional cache-aside snapshot of the full list.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use repository::RecipeRepository;
