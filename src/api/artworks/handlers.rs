use crate::api::models::*;
use crate::api::parse_object_id;
use crate::query::{total_pages, ExploreParams, ExplorePlan};
use crate::store::artworks::merge_patch;
use axum::extract::{Path, Query, State};
use axum::Json;
use mongodb::bson::{to_document, DateTime, Document};
use tracing::info;

/// `GET /artwork` — all artworks, optionally filtered by owner email.
pub async fn list_artworks_handler(
    State(state): State<AppState>,
    Query(params): Query<ListArtworksParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let artworks = state
        .artworks
        .list(params.email.as_deref())
        .await
        .map_err(|e| AppError::Internal(format!("Fetch artworks failed: {}", e)))?;

    Ok(Json(artworks))
}

/// `GET /artwork-details/{id}`
pub async fn artwork_details_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let oid = parse_object_id(&id)?;

    let artwork = state
        .artworks
        .find_by_id(oid)
        .await
        .map_err(|e| AppError::Internal(format!("Fetch artwork failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Artwork {} not found", id)))?;

    Ok(Json(artwork))
}

/// `GET /artworks-recent` — newest public artworks.
pub async fn recent_artworks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let artworks = state
        .artworks
        .recent()
        .await
        .map_err(|e| AppError::Internal(format!("Fetch recent artworks failed: {}", e)))?;

    Ok(Json(artworks))
}

/// `GET /explore-artworks` — filtered, sorted, paginated public listing.
pub async fn explore_artworks_handler(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
) -> Result<Json<ExploreResponse>, AppError> {
    let plan = ExplorePlan::build(&params);

    info!(
        category = params.category.as_deref().unwrap_or("All"),
        skip = plan.skip,
        limit = plan.limit,
        "Exploring artworks"
    );

    let (artworks, total) = state
        .artworks
        .explore(&plan)
        .await
        .map_err(|e| AppError::Internal(format!("Explore query failed: {}", e)))?;

    Ok(Json(ExploreResponse {
        artworks,
        total_pages: total_pages(total, plan.limit),
    }))
}

/// `GET /artworks-stats` — every artwork document, unfiltered.
pub async fn artworks_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let artworks = state
        .artworks
        .list(None)
        .await
        .map_err(|e| AppError::Internal(format!("Fetch artworks failed: {}", e)))?;

    Ok(Json(artworks))
}

/// `POST /artwork` — pass-through insert with server-side stamps.
pub async fn create_artwork_handler(
    State(state): State<AppState>,
    Json(request): Json<NewArtwork>,
) -> Result<Json<InsertArtworkResponse>, AppError> {
    let mut artwork = to_document(&request)
        .map_err(|e| AppError::BadRequest(format!("Invalid artwork payload: {}", e)))?;
    artwork.insert("likes", 0_i64);
    artwork.insert("liked", false);
    artwork.insert("createdAt", DateTime::now());

    info!(title = %request.title, owner = %request.user_email, "Creating artwork");

    let result = state
        .artworks
        .insert(artwork.clone())
        .await
        .map_err(|e| AppError::Internal(format!("Insert artwork failed: {}", e)))?;

    Ok(Json(InsertArtworkResponse {
        message: "Artwork added successfully".to_string(),
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
        data: artwork,
    }))
}

/// `PATCH /artwork/{id}` — shallow field merge over the stored document.
pub async fn update_artwork_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ArtworkPatch>,
) -> Result<Json<UpdateArtworkResponse>, AppError> {
    let oid = parse_object_id(&id)?;

    let existing = state
        .artworks
        .find_by_id(oid)
        .await
        .map_err(|e| AppError::Internal(format!("Fetch artwork failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Artwork {} not found", id)))?;

    let patch = to_document(&patch)
        .map_err(|e| AppError::BadRequest(format!("Invalid patch payload: {}", e)))?;
    let merged = merge_patch(&existing, patch);

    let result = state
        .artworks
        .replace(oid, merged.clone())
        .await
        .map_err(|e| AppError::Internal(format!("Update artwork failed: {}", e)))?;

    // Deleted between the fetch and the write
    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("Artwork {} not found", id)));
    }

    let message = if result.modified_count == 0 {
        "No changes applied to the artwork".to_string()
    } else {
        "Artwork updated successfully".to_string()
    };

    info!(id = %id, modified = result.modified_count, "Artwork update");

    Ok(Json(UpdateArtworkResponse {
        message,
        data: merged,
    }))
}

/// `PATCH /artwork/like/{id}` — flip the like flag and move the counter.
pub async fn like_artwork_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let oid = parse_object_id(&id)?;

    let existing = state
        .artworks
        .find_by_id(oid)
        .await
        .map_err(|e| AppError::Internal(format!("Fetch artwork failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Artwork {} not found", id)))?;

    let currently_liked = existing.get_bool("liked").unwrap_or(false);

    let updated = state
        .artworks
        .set_like(oid, currently_liked)
        .await
        .map_err(|e| AppError::Internal(format!("Like toggle failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Artwork {} not found", id)))?;

    info!(id = %id, liked = !currently_liked, "Like toggled");

    Ok(Json(updated))
}

/// `DELETE /artwork/{id}`
pub async fn delete_artwork_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let oid = parse_object_id(&id)?;

    let result = state
        .artworks
        .delete(oid)
        .await
        .map_err(|e| AppError::Internal(format!("Delete artwork failed: {}", e)))?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("Artwork {} not found", id)));
    }

    info!(id = %id, "Artwork deleted");

    Ok(Json(MessageResponse {
        message: "Artwork deleted successfully".to_string(),
    }))
}
