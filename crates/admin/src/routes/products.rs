//! Product CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use meridian_core::ProductId;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::product::{CreateProductInput, Product, ProductSort, UpdateProductInput};
use crate::models::{UpdateQuantityInput, UpdateStatusInput};
use crate::state::AppState;

/// Query params for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Sort option; unknown values fall back to A-to-Z.
    pub sort: Option<String>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// Product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update))
        .route("/{id}/quantity", put(update_quantity))
        .route("/{id}/status", put(update_status))
}

/// Create a product.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!(id = %product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// List products, excluding deleted ones.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let sort = params
        .sort
        .as_deref()
        .map(ProductSort::from_param)
        .unwrap_or_default();
    let products = ProductRepository::new(state.pool())
        .list(sort, params.search.as_deref())
        .await?;
    Ok(Json(products))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_visible(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Patch a product.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?;
    Ok(Json(product))
}

/// Set product stock counters.
#[instrument(skip(state, input))]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateQuantityInput>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .update_quantity(id, &input)
        .await?;
    Ok(Json(product))
}

/// Set the product catalog status.
#[instrument(skip(state, input))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .update_status(id, input.status)
        .await?;
    tracing::info!(id = %id, status = %input.status, "Product status updated");
    Ok(Json(product))
}
