//! Database operations for orders and order analytics.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use meridian_core::{LineItem, OrderId, OrderStatus};

use super::{RepositoryError, decode_status};
use crate::models::order::{
    BestSellingProduct, CreateOrderInput, Order, OrderSort, UpdateOrderInput,
};

/// Column list shared by every order query.
const COLUMNS: &str = "id, customer, shipping_address, items, total, status, tracking_id, \
     notes, created_at, updated_at";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer: serde_json::Value,
    shipping_address: serde_json::Value,
    items: Json<Vec<LineItem>>,
    total: Decimal,
    status: String,
    tracking_id: String,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(row.id),
            customer: row.customer,
            shipping_address: row.shipping_address,
            items: row.items.0,
            total: row.total,
            status: decode_status("orders.status", &row.status)?,
            tracking_id: row.tracking_id,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for the best-selling products CTE.
#[derive(Debug, sqlx::FromRow)]
struct BestSellingRow {
    product_id: String,
    product_name: String,
    total_sales: Decimal,
    total_order_quantity: i64,
}

impl From<BestSellingRow> for BestSellingProduct {
    fn from(row: BestSellingRow) -> Self {
        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            total_sales: row.total_sales,
            total_order_quantity: row.total_order_quantity,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, input), fields(status = %input.status, items = input.items.len()))]
    pub async fn create(&self, input: &CreateOrderInput) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO orders (customer, shipping_address, items, total, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row: OrderRow = sqlx::query_as(&sql)
            .bind(&input.customer)
            .bind(&input.shipping_address)
            .bind(Json(&input.items))
            .bind(input.total)
            .bind(input.status.as_str())
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// List orders in one status, within the last two months.
    ///
    /// The two-month window matches the admin dashboard, which never pages
    /// further back; older orders are reachable through the reports.
    /// Search scans the customer document and item product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        status: OrderStatus,
        sort: OrderSort,
        search: Option<&str>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE status = $1 \
               AND created_at >= now() - interval '2 months' \
               AND ($2::text IS NULL \
                    OR lower(customer->>'lastName') LIKE $2 \
                    OR lower(customer->>'firstName') LIKE $2 \
                    OR lower(customer->>'emailAddress') LIKE $2 \
                    OR lower(customer->>'contactNumber') LIKE $2 \
                    OR EXISTS (SELECT 1 FROM jsonb_array_elements(items) item \
                               WHERE lower(item->>'productName') LIKE $2)) \
             ORDER BY {}",
            sort.order_clause()
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(status.as_str())
            .bind(search.map(|s| format!("%{}%", s.to_lowercase())))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Patch an order; `None` fields keep their current value.
    ///
    /// Stock adjustment is NOT done here - the caller runs
    /// [`crate::services::inventory`] first and only then persists the new
    /// status through this method.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: OrderId,
        input: &UpdateOrderInput,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            "UPDATE orders SET \
             customer = COALESCE($2, customer), \
             shipping_address = COALESCE($3, shipping_address), \
             items = COALESCE($4, items), \
             total = COALESCE($5, total), \
             status = COALESCE($6, status), \
             tracking_id = COALESCE($7, tracking_id), \
             notes = COALESCE($8, notes), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.customer.as_ref())
            .bind(input.shipping_address.as_ref())
            .bind(input.items.as_ref().map(Json))
            .bind(input.total)
            .bind(input.status.map(OrderStatus::as_str))
            .bind(input.tracking_id.as_deref())
            .bind(input.notes.as_deref())
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set the order status without touching anything else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            "UPDATE orders SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Orders in one status for a month, oldest first (report export).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_month(
        &self,
        status: OrderStatus,
        year: i32,
        month: u32,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE status = $1 \
               AND EXTRACT(YEAR FROM created_at)::int = $2 \
               AND EXTRACT(MONTH FROM created_at)::int = $3 \
             ORDER BY created_at ASC"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(status.as_str())
            .bind(year)
            .bind(i32::try_from(month).unwrap_or_default())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Total sales per day for orders in one status within a month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn daily_revenue(
        &self,
        status: OrderStatus,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, Decimal)>, RepositoryError> {
        let rows: Vec<(NaiveDate, Decimal)> = sqlx::query_as(
            "SELECT DATE(created_at) AS day, SUM(total) AS total \
             FROM orders \
             WHERE status = $1 \
               AND EXTRACT(YEAR FROM created_at)::int = $2 \
               AND EXTRACT(MONTH FROM created_at)::int = $3 \
             GROUP BY day \
             ORDER BY day ASC",
        )
        .bind(status.as_str())
        .bind(year)
        .bind(i32::try_from(month).unwrap_or_default())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Order counts per day for orders in one status within a month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn daily_counts(
        &self,
        status: OrderStatus,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, i64)>, RepositoryError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT DATE(created_at) AS day, COUNT(*) AS count \
             FROM orders \
             WHERE status = $1 \
               AND EXTRACT(YEAR FROM created_at)::int = $2 \
               AND EXTRACT(MONTH FROM created_at)::int = $3 \
             GROUP BY day \
             ORDER BY day ASC",
        )
        .bind(status.as_str())
        .bind(year)
        .bind(i32::try_from(month).unwrap_or_default())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Best-selling products for a month, computed by unnesting the
    /// embedded line items and grouping by product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn best_selling(
        &self,
        status: OrderStatus,
        year: i32,
        month: u32,
    ) -> Result<Vec<BestSellingProduct>, RepositoryError> {
        let rows: Vec<BestSellingRow> = sqlx::query_as(
            "WITH exploded AS ( \
                 SELECT \
                     (jsonb_array_elements(items)->>'productId')::text AS product_id, \
                     (jsonb_array_elements(items)->>'productName')::text AS product_name, \
                     (jsonb_array_elements(items)->>'quantity')::int AS quantity, \
                     (jsonb_array_elements(items)->>'discountedPrice')::numeric AS discounted_price \
                 FROM orders \
                 WHERE status = $1 \
                   AND EXTRACT(YEAR FROM created_at)::int = $2 \
                   AND EXTRACT(MONTH FROM created_at)::int = $3 \
             ) \
             SELECT \
                 product_id, \
                 product_name, \
                 SUM(quantity * discounted_price) AS total_sales, \
                 SUM(quantity)::bigint AS total_order_quantity \
             FROM exploded \
             GROUP BY product_id, product_name \
             ORDER BY total_sales DESC",
        )
        .bind(status.as_str())
        .bind(year)
        .bind(i32::try_from(month).unwrap_or_default())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
