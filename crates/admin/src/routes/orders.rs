//! Order handlers: CRUD, status changes, and the dashboard analytics.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use meridian_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::models::order::{CreateOrderInput, Order, OrderSort, UpdateOrderInput};
use crate::services::inventory::{self, PgStockStore};
use crate::state::AppState;

/// Query params for the order listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Status bucket to list (short code, e.g. `PEN`).
    pub status: String,
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Query params for the analytics endpoints.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Status to aggregate over; defaults to delivered.
    pub status: Option<String>,
}

/// Input for the status-only update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusInput {
    pub status: OrderStatus,
}

/// Order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/revenue", get(revenue))
        .route("/totals", get(totals))
        .route("/best-selling", get(best_selling))
        .route("/{id}", put(update))
        .route("/{id}/status", put(update_status))
}

fn parse_status(raw: &str) -> Result<OrderStatus, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown order status {raw:?}")))
}

/// Create an order.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<Order>, AppError> {
    let order = OrderRepository::new(state.pool()).create(&input).await?;
    tracing::info!(id = %order.id, status = %order.status, "Order created");
    Ok(Json(order))
}

/// List orders in one status bucket (last two months).
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>, AppError> {
    let status = parse_status(&params.status)?;
    let sort = params
        .sort
        .as_deref()
        .map(OrderSort::from_param)
        .unwrap_or_default();
    let orders = OrderRepository::new(state.pool())
        .list(status, sort, params.search.as_deref())
        .await?;
    Ok(Json(orders))
}

/// Patch an order.
///
/// When the payload carries both line items and a status, the stock
/// adjustment runs against the current status BEFORE the order row is
/// written, so a failed adjustment leaves the order in its old status.
/// The status-only endpoint below skips the adjustment entirely.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<Order>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if let (Some(items), Some(next)) = (input.items.as_deref(), input.status) {
        let store = PgStockStore::new(state.pool());
        inventory::adjust_for_status_change(&store, existing.status, next, items).await?;
    }

    let order = repo.update(id, &input).await?;
    tracing::info!(id = %id, status = %order.status, "Order updated");
    Ok(Json(order))
}

/// Set the order status without adjusting stock.
#[instrument(skip(state, input))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateOrderStatusInput>,
) -> Result<Json<Order>, AppError> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, input.status)
        .await?;
    tracing::info!(id = %id, status = %input.status, "Order status updated");
    Ok(Json(order))
}

/// Previous month of a (year, month) pair.
const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// Daily revenue of delivered orders, current and previous month.
#[instrument(skip(state))]
pub async fn revenue(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let now = Utc::now();
    let (year, month) = (now.year(), now.month());
    let (prev_year, prev_month) = previous_month(year, month);

    let current: BTreeMap<String, _> = repo
        .daily_revenue(OrderStatus::Delivered, year, month)
        .await?
        .into_iter()
        .map(|(day, total)| (day.format("%Y-%m-%d").to_string(), total))
        .collect();
    let previous: BTreeMap<String, _> = repo
        .daily_revenue(OrderStatus::Delivered, prev_year, prev_month)
        .await?
        .into_iter()
        .map(|(day, total)| (day.format("%Y-%m-%d").to_string(), total))
        .collect();

    Ok(Json(json!({
        "currentData": current,
        "previousData": previous,
    })))
}

/// Daily order counts in one status, current and previous month.
#[instrument(skip(state))]
pub async fn totals(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = params
        .status
        .as_deref()
        .map_or(Ok(OrderStatus::Delivered), parse_status)?;
    let repo = OrderRepository::new(state.pool());
    let now = Utc::now();
    let (year, month) = (now.year(), now.month());
    let (prev_year, prev_month) = previous_month(year, month);

    let current: BTreeMap<String, i64> = repo
        .daily_counts(status, year, month)
        .await?
        .into_iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), count))
        .collect();
    let previous: BTreeMap<String, i64> = repo
        .daily_counts(status, prev_year, prev_month)
        .await?
        .into_iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), count))
        .collect();

    Ok(Json(json!({
        "currentData": current,
        "previousData": previous,
    })))
}

/// Best-selling products for the current month.
#[instrument(skip(state))]
pub async fn best_selling(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = params
        .status
        .as_deref()
        .map_or(Ok(OrderStatus::Delivered), parse_status)?;
    let now = Utc::now();
    let rows = OrderRepository::new(state.pool())
        .best_selling(status, now.year(), now.month())
        .await?;

    Ok(Json(json!({ "bestSellingProducts": rows })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_month_wraps_january() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 8), (2026, 7));
    }
}
