use crate::api::artworks::handlers::*;
use crate::api::models::AppState;
use axum::{
    routing::{get, patch},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/artwork",
            get(list_artworks_handler).post(create_artwork_handler),
        )
        .route("/artwork-details/{id}", get(artwork_details_handler))
        .route("/artworks-recent", get(recent_artworks_handler))
        .route("/explore-artworks", get(explore_artworks_handler))
        .route("/artworks-stats", get(artworks_stats_handler))
        .route(
            "/artwork/{id}",
            patch(update_artwork_handler).delete(delete_artwork_handler),
        )
        .route("/artwork/like/{id}", patch(like_artwork_handler))
}
