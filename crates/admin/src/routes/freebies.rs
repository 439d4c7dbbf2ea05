//! Freebie CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use meridian_core::FreebieId;

use crate::db::FreebieRepository;
use crate::error::AppError;
use crate::models::freebie::{
    CreateFreebieInput, Freebie, FreebieDropdownEntry, FreebieSort, UpdateFreebieInput,
};
use crate::models::{UpdateQuantityInput, UpdateStatusInput};
use crate::state::AppState;

/// Query params for the freebie listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Freebie routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/dropdown", get(dropdown))
        .route("/{id}", get(show).put(update))
        .route("/{id}/quantity", put(update_quantity))
        .route("/{id}/status", put(update_status))
}

/// Create a freebie.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFreebieInput>,
) -> Result<Json<Freebie>, AppError> {
    let freebie = FreebieRepository::new(state.pool()).create(&input).await?;
    tracing::info!(id = %freebie.id, name = %freebie.name, "Freebie created");
    Ok(Json(freebie))
}

/// List freebies, excluding deleted ones.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Freebie>>, AppError> {
    let sort = params
        .sort
        .as_deref()
        .map(FreebieSort::from_param)
        .unwrap_or_default();
    let freebies = FreebieRepository::new(state.pool())
        .list(sort, params.search.as_deref())
        .await?;
    Ok(Json(freebies))
}

/// Active freebies as id + name pairs, for the product form picker.
#[instrument(skip(state))]
pub async fn dropdown(
    State(state): State<AppState>,
) -> Result<Json<Vec<FreebieDropdownEntry>>, AppError> {
    let entries = FreebieRepository::new(state.pool()).dropdown().await?;
    Ok(Json(entries))
}

/// Fetch one freebie.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<FreebieId>,
) -> Result<Json<Freebie>, AppError> {
    let freebie = FreebieRepository::new(state.pool())
        .get_visible(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("freebie {id}")))?;
    Ok(Json(freebie))
}

/// Patch a freebie.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<FreebieId>,
    Json(input): Json<UpdateFreebieInput>,
) -> Result<Json<Freebie>, AppError> {
    let freebie = FreebieRepository::new(state.pool())
        .update(id, &input)
        .await?;
    Ok(Json(freebie))
}

/// Set freebie stock counters.
#[instrument(skip(state, input))]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<FreebieId>,
    Json(input): Json<UpdateQuantityInput>,
) -> Result<Json<Freebie>, AppError> {
    let freebie = FreebieRepository::new(state.pool())
        .update_quantity(id, &input)
        .await?;
    Ok(Json(freebie))
}

/// Set the freebie catalog status.
#[instrument(skip(state, input))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<FreebieId>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Freebie>, AppError> {
    let freebie = FreebieRepository::new(state.pool())
        .update_status(id, input.status)
        .await?;
    tracing::info!(id = %id, status = %input.status, "Freebie status updated");
    Ok(Json(freebie))
}
