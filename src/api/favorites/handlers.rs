use crate::api::models::*;
use crate::api::parse_object_id;
use axum::extract::{Path, State};
use axum::Json;
use mongodb::bson::{to_document, Document};
use tracing::info;

/// `GET /favorites`
pub async fn list_favorites_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let favorites = state
        .favorites
        .list()
        .await
        .map_err(|e| AppError::Internal(format!("Fetch favorites failed: {}", e)))?;

    Ok(Json(favorites))
}

/// `POST /favorites` — insert unless the artwork is already favorited.
///
/// Re-submitting the same artwork reference is a success, not an error;
/// the second call just reports it without inserting.
pub async fn create_favorite_handler(
    State(state): State<AppState>,
    Json(request): Json<NewFavorite>,
) -> Result<Json<CreateFavoriteResponse>, AppError> {
    let existing = state
        .favorites
        .find_by_artwork(&request.artwork_id)
        .await
        .map_err(|e| AppError::Internal(format!("Fetch favorite failed: {}", e)))?;

    if existing.is_some() {
        info!(artwork_id = %request.artwork_id, "Already favorited");
        return Ok(Json(CreateFavoriteResponse {
            message: "Already favorited".to_string(),
            inserted_id: None,
        }));
    }

    let favorite = to_document(&request)
        .map_err(|e| AppError::BadRequest(format!("Invalid favorite payload: {}", e)))?;

    let result = state
        .favorites
        .insert(favorite)
        .await
        .map_err(|e| AppError::Internal(format!("Insert favorite failed: {}", e)))?;

    info!(artwork_id = %request.artwork_id, "Favorite added");

    Ok(Json(CreateFavoriteResponse {
        message: "Favorite added successfully".to_string(),
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
    }))
}

/// `DELETE /favorites/{artworkId}` — remove by artwork reference.
pub async fn delete_favorite_handler(
    State(state): State<AppState>,
    Path(artwork_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = state
        .favorites
        .delete_by_artwork(&artwork_id)
        .await
        .map_err(|e| AppError::Internal(format!("Delete favorite failed: {}", e)))?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!(
            "No favorite for artwork {}",
            artwork_id
        )));
    }

    Ok(Json(MessageResponse {
        message: "Favorite removed successfully".to_string(),
    }))
}

/// `DELETE /my-favorites/{id}` — remove by the favorite's own id and
/// hand back the refreshed list.
pub async fn delete_my_favorite_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let oid = parse_object_id(&id)?;

    let result = state
        .favorites
        .delete_by_id(oid)
        .await
        .map_err(|e| AppError::Internal(format!("Delete favorite failed: {}", e)))?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("Favorite {} not found", id)));
    }

    let favorites = state
        .favorites
        .list()
        .await
        .map_err(|e| AppError::Internal(format!("Fetch favorites failed: {}", e)))?;

    Ok(Json(favorites))
}
