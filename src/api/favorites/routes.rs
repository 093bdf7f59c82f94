use crate::api::favorites::handlers::*;
use crate::api::models::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(list_favorites_handler).post(create_favorite_handler),
        )
        .route("/favorites/{artworkId}", delete(delete_favorite_handler))
        .route("/my-favorites/{id}", delete(delete_my_favorite_handler))
}
