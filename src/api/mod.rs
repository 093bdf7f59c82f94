pub mod artworks;
pub mod favorites;
pub mod models;

// Re-exports
pub use models::*;

use axum::{extract::State, Json};
use mongodb::bson::oid::ObjectId;

/// Path identifiers arrive as hex strings; anything that is not a valid
/// ObjectId is rejected before touching the store.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid id: {}", id)))
}

// Root greeting, preserved from the original deployment
pub async fn root_handler() -> &'static str {
    "Hello World!"
}

pub async fn health_handler(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let artworks = state.artworks.count().await.unwrap_or(0);
    let favorites = state.favorites.count().await.unwrap_or(0);
    Json(models::HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        artworks,
        favorites,
    })
}
