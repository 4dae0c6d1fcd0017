//! API Routes
//!
//! Configures the Axum router with all recipe endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_recipe_handler, delete_recipe_handler, health_handler, list_recipes_handler,
    search_recipes_handler, update_recipe_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /recipes` - List every recipe
/// - `POST /recipes` - Create a recipe
/// - `PUT /recipes/:id` - Overwrite a recipe
/// - `DELETE /recipes/:id` - Delete a recipe
/// - `GET /recipes/search?tag=` - Recipes carrying a tag
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route("/recipes/search", get(search_recipes_handler))
        .route(
            "/recipes/:id",
            put(update_recipe_handler).delete(delete_recipe_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
