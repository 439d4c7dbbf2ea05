//! Homepage image handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::instrument;

use meridian_core::HomeImageId;

use crate::db::HomeImageRepository;
use crate::error::AppError;
use crate::models::home_image::{CreateHomeImageInput, HomeImage, UpdateHomeImageInput};
use crate::state::AppState;

/// Home image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", axum::routing::put(update).delete(delete))
}

/// Create an image set.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateHomeImageInput>,
) -> Result<Json<HomeImage>, AppError> {
    let set = HomeImageRepository::new(state.pool())
        .create(&input.images)
        .await?;
    tracing::info!(id = %set.id, count = set.images.len(), "Home images created");
    Ok(Json(set))
}

/// List all image sets.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<HomeImage>>, AppError> {
    let sets = HomeImageRepository::new(state.pool()).list().await?;
    Ok(Json(sets))
}

/// Replace the images of a set.
///
/// Submitting an empty list deletes the row - the storefront edit dialog
/// uses this to remove a carousel entry.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<HomeImageId>,
    Json(input): Json<UpdateHomeImageInput>,
) -> Result<Response, AppError> {
    let repo = HomeImageRepository::new(state.pool());

    if input.images.is_empty() {
        let deleted = repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("home images {id}")));
        }
        tracing::info!(id = %id, "Home images removed via empty update");
        return Ok(Json(json!({ "deleted": true })).into_response());
    }

    let set = repo.replace_images(id, &input.images).await?;
    Ok(Json(set).into_response())
}

/// Delete an image set.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<HomeImageId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = HomeImageRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("home images {id}")));
    }
    tracing::info!(id = %id, "Home images deleted");
    Ok(Json(json!({ "deleted": true })))
}
