//! CSV report export handlers.
//!
//! Each report takes optional `month`/`year` query params (defaulting to
//! the current month) and streams back a CSV attachment.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::instrument;

use meridian_core::OrderStatus;

use crate::db::{FreebieRepository, OrderRepository, ProductRepository};
use crate::error::AppError;
use crate::services::reports;
use crate::state::AppState;

/// Month/year selection; both default to today.
#[derive(Debug, Deserialize)]
pub struct MonthParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl MonthParams {
    fn resolve(&self) -> Result<(i32, u32), AppError> {
        let now = Utc::now();
        let month = self.month.unwrap_or_else(|| now.month());
        if !(1..=12).contains(&month) {
            return Err(AppError::BadRequest("Invalid month".to_string()));
        }
        Ok((self.year.unwrap_or_else(|| now.year()), month))
    }
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(revenue))
        .route("/total-orders", get(total_orders))
        .route("/best-selling", get(best_selling))
        .route("/total-expenses", get(total_expenses))
}

/// Wrap a CSV body with download headers.
fn csv_attachment(filename: &str, csv: String) -> Response {
    (
        StatusCode::OK,
        [
            ("Content-Type", "text/csv"),
            (
                "Content-Disposition",
                &format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Revenue report: delivered orders for the month with a grand total.
#[instrument(skip(state))]
pub async fn revenue(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Response, AppError> {
    let (year, month) = params.resolve()?;
    let orders = OrderRepository::new(state.pool())
        .for_month(OrderStatus::Delivered, year, month)
        .await?;
    let csv = reports::revenue_csv(&orders);
    Ok(csv_attachment("revenue_data.csv", csv))
}

/// Orders-per-day report for delivered orders.
#[instrument(skip(state))]
pub async fn total_orders(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Response, AppError> {
    let (year, month) = params.resolve()?;
    let counts: BTreeMap<_, _> = OrderRepository::new(state.pool())
        .daily_counts(OrderStatus::Delivered, year, month)
        .await?
        .into_iter()
        .collect();
    let csv = reports::total_orders_csv(&counts);
    Ok(csv_attachment("order_data.csv", csv))
}

/// Best-selling products report.
#[instrument(skip(state))]
pub async fn best_selling(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Response, AppError> {
    let (year, month) = params.resolve()?;
    let rows = OrderRepository::new(state.pool())
        .best_selling(OrderStatus::Delivered, year, month)
        .await?;
    let csv = reports::best_selling_csv(&rows);
    Ok(csv_attachment("best_selling_products.csv", csv))
}

/// Intake-expenses report across products and freebies.
#[instrument(skip(state))]
pub async fn total_expenses(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Response, AppError> {
    let (year, month) = params.resolve()?;
    let products = ProductRepository::new(state.pool())
        .monthly_expense_rows(year, month)
        .await?;
    let freebies = FreebieRepository::new(state.pool())
        .monthly_expense_rows(year, month)
        .await?;
    let csv = reports::total_expenses_csv(&products, &freebies);
    Ok(csv_attachment("total_expenses.csv", csv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_params_reject_out_of_range() {
        let params = MonthParams {
            month: Some(13),
            year: Some(2026),
        };
        assert!(params.resolve().is_err());

        let params = MonthParams {
            month: Some(0),
            year: Some(2026),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn test_month_params_pass_through_explicit_values() {
        let params = MonthParams {
            month: Some(3),
            year: Some(2025),
        };
        assert_eq!(params.resolve().expect("valid"), (2025, 3));
    }
}
