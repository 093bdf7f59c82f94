use crate::store::{ArtworkStore, FavoriteStore};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub artworks: ArtworkStore,
    pub favorites: FavoriteStore,
}

/// Query parameters of `GET /artwork`
#[derive(Debug, Default, Deserialize)]
pub struct ListArtworksParams {
    pub email: Option<String>,
}

/// Body of `POST /artwork`. Known fields are typed; any further
/// descriptive fields ride along in `extra` and are stored as-is.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtwork {
    pub title: String,
    pub category: String,
    pub price: f64,
    pub user_email: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_visibility() -> String {
    "Public".to_string()
}

/// Body of `PATCH /artwork/{id}`. Every field is optional; only fields
/// actually present in the payload take part in the merge.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /favorites`: the artwork reference plus whatever
/// denormalized display fields the client sends.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub artwork_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response after inserting an artwork
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertArtworkResponse {
    pub message: String,
    pub inserted_id: Option<String>,
    pub data: Document,
}

/// Response after a merge update (including the no-op case)
#[derive(Debug, Serialize)]
pub struct UpdateArtworkResponse {
    pub message: String,
    pub data: Document,
}

/// Response of the explore listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreResponse {
    pub artworks: Vec<Document>,
    pub total_pages: u64,
}

/// Response after creating (or re-submitting) a favorite
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteResponse {
    pub message: String,
    pub inserted_id: Option<String>,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub artworks: u64,
    pub favorites: u64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: status.to_string(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, to_document};

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = ArtworkPatch {
            price: Some(42.0),
            ..ArtworkPatch::default()
        };
        let document = to_document(&patch).unwrap();
        assert_eq!(document, doc! { "price": 42.0 });
    }

    #[test]
    fn patch_carries_unknown_fields_through_extra() {
        let patch: ArtworkPatch =
            serde_json::from_value(serde_json::json!({ "medium": "oil", "title": "Dusk" }))
                .unwrap();
        let document = to_document(&patch).unwrap();
        assert_eq!(document.get_str("title").unwrap(), "Dusk");
        assert_eq!(document.get_str("medium").unwrap(), "oil");
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn new_artwork_defaults_to_public_visibility() {
        let artwork: NewArtwork = serde_json::from_value(serde_json::json!({
            "title": "Dusk",
            "category": "Painting",
            "price": 120.0,
            "userEmail": "a@b.c",
        }))
        .unwrap();
        assert_eq!(artwork.visibility, "Public");
        assert!(artwork.extra.is_empty());
    }

    #[test]
    fn error_variants_map_to_http_statuses() {
        let not_found = AppError::NotFound("missing".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let internal = AppError::Internal("boom".into()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad = AppError::BadRequest("nope".into()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_display_carries_the_message() {
        assert_eq!(
            AppError::NotFound("Artwork abc not found".into()).to_string(),
            "Artwork abc not found"
        );
        assert_eq!(AppError::Internal("boom".into()).to_string(), "boom");
    }
}
