//! Review handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use meridian_core::{ProductId, ReviewId};

use crate::db::ReviewRepository;
use crate::error::AppError;
use crate::models::UpdateStatusInput;
use crate::models::review::{CreateReviewInput, Review, ReviewSort, UpdateReviewInput};
use crate::state::AppState;

/// Query params for the review listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Review routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/product/{product_id}", get(for_product))
        .route("/{id}", put(update))
        .route("/{id}/status", put(update_status))
}

/// Create a review.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReviewInput>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewRepository::new(state.pool()).create(&input).await?;
    tracing::info!(id = %review.id, product = %review.product_id, "Review created");
    Ok(Json(review))
}

/// List reviews, excluding deleted ones.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Review>>, AppError> {
    let sort = params
        .sort
        .as_deref()
        .map(ReviewSort::from_param)
        .unwrap_or_default();
    let reviews = ReviewRepository::new(state.pool())
        .list(sort, params.search.as_deref())
        .await?;
    Ok(Json(reviews))
}

/// Reviews for one product, newest first.
#[instrument(skip(state))]
pub async fn for_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = ReviewRepository::new(state.pool())
        .for_product(product_id)
        .await?;
    Ok(Json(reviews))
}

/// Patch a review.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Json(input): Json<UpdateReviewInput>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewRepository::new(state.pool())
        .update(id, &input)
        .await?;
    Ok(Json(review))
}

/// Moderate a review (status flip).
#[instrument(skip(state, input))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewRepository::new(state.pool())
        .update_status(id, input.status)
        .await?;
    tracing::info!(id = %id, status = %input.status, "Review status updated");
    Ok(Json(review))
}
