//! API Handlers
//!
//! HTTP request handlers for each recipe endpoint. Each one is a thin
//! translation onto [`RecipeRepository`].

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::info;

use crate::cache::{MemoryCache, RecipeCache, RedisCache};
use crate::config::{CacheBackend, Config, StoreBackend};
use crate::error::{ApiError, RecipeError};
use crate::models::{HealthResponse, MessageResponse, Recipe, RecipeInput, SearchQuery};
use crate::repository::RecipeRepository;
use crate::store::{MemoryStore, MongoStore, RecipeStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: RecipeRepository,
}

impl AppState {
    /// Creates a new AppState around an already wired repository.
    pub fn new(repository: RecipeRepository) -> Self {
        Self { repository }
    }

    /// Connects the configured store and cache, pinging each.
    ///
    /// Any unreachable backend is an error; the caller decides whether that is fatal.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecipeStore> = match config.store_backend {
            StoreBackend::Mongo => {
                let store = MongoStore::connect(&config.mongo_url, &config.mongo_db)
                    .await
                    .context("failed to create MongoDB client")?;
                store.ping().await.context("MongoDB is unreachable")?;
                info!("Connected to MongoDB database '{}'", config.mongo_db);
                Arc::new(store)
            }
            StoreBackend::Memory => {
                info!("Using in-memory recipe store");
                Arc::new(MemoryStore::new())
            }
        };

        let cache: Option<Arc<dyn RecipeCache>> = match config.cache_backend {
            CacheBackend::Redis => {
                let cache = RedisCache::connect(&config.redis_url)
                    .await
                    .context("failed to connect to Redis")?;
                cache.ping().await.context("Redis is unreachable")?;
                info!("Connected to Redis at {}", config.redis_url);
                Some(Arc::new(cache))
            }
            CacheBackend::Memory => {
                info!("Using in-memory recipe cache");
                Some(Arc::new(MemoryCache::new()))
            }
            CacheBackend::Disabled => {
                info!("Recipe caching disabled");
                None
            }
        };

        let mut repository = RecipeRepository::new(store).with_mode(config.error_mode);
        if let Some(cache) = cache {
            repository = repository.with_cache(cache);
        }

        Ok(Self::new(repository))
    }

    fn reject(&self, err: RecipeError) -> ApiError {
        self.repository.mode().reject(err)
    }
}

/// Unwraps an extractor result, turning its rejection into a client input error.
fn bind<T, R: fmt::Display>(state: &AppState, extracted: Result<T, R>) -> Result<T, ApiError> {
    extracted.map_err(|rejection| state.reject(RecipeError::ClientInput(rejection.to_string())))
}

/// Decodes a recipe body without looking at its content type.
fn bind_recipe(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<RecipeInput, ApiError> {
    let body = bind(state, body)?;
    RecipeInput::from_json(&body).map_err(|e| state.reject(e))
}

/// Handler for GET /recipes
pub async fn list_recipes_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.repository.list().await.map_err(|e| state.reject(e))?;
    Ok(Json(recipes))
}

/// Handler for POST /recipes
///
/// Responds with the stored record, including its server-assigned id and timestamp.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let input = bind_recipe(&state, body)?;
    let recipe = state
        .repository
        .create(input)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(recipe))
}

/// Handler for PUT /recipes/:id
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = bind(&state, id)?;
    let input = bind_recipe(&state, body)?;
    state
        .repository
        .update(&id, input)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(MessageResponse::updated()))
}

/// Handler for DELETE /recipes/:id
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = bind(&state, id)?;
    state
        .repository
        .delete(&id)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(MessageResponse::deleted()))
}

/// Handler for GET /recipes/search?tag=
///
/// Only the first `tag` value counts; repeats are ignored.
pub async fn search_recipes_handler(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(pairs) = bind(&state, pairs)?;
    let query = SearchQuery::from_pairs(pairs);
    let recipes = state
        .repository
        .search_by_tag(&query.tag)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(recipes))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
