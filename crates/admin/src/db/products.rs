//! Database operations for products.
//!
//! Queries are runtime-checked (`sqlx::query_as` + binds) against the
//! `products` table; rows decode through an internal row type so stored
//! status codes surface as `DataCorruption` instead of panics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use meridian_core::{CatalogStatus, ProductId};

use super::{RepositoryError, decode_status};
use crate::models::UpdateQuantityInput;
use crate::models::product::{CreateProductInput, Product, ProductSort, UpdateProductInput};
use crate::models::report::ExpenseRow;

/// Column list shared by every product query.
const COLUMNS: &str = "id, name, images, discount_percent, supplier_price, original_price, \
     discounted_price, description, details, original_quantity, current_quantity, status, \
     units_sold, freebies, created_at, updated_at";

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    images: Json<Vec<String>>,
    discount_percent: Decimal,
    supplier_price: Decimal,
    original_price: Decimal,
    discounted_price: Decimal,
    description: String,
    details: serde_json::Value,
    original_quantity: Decimal,
    current_quantity: Decimal,
    status: String,
    units_sold: Decimal,
    freebies: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            images: row.images.0,
            discount_percent: row.discount_percent,
            supplier_price: row.supplier_price,
            original_price: row.original_price,
            discounted_price: row.discounted_price,
            description: row.description,
            details: row.details,
            original_quantity: row.original_quantity,
            current_quantity: row.current_quantity,
            status: decode_status("products.status", &row.status)?,
            units_sold: row.units_sold,
            freebies: row.freebies.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CreateProductInput) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products (name, images, discount_percent, supplier_price, \
             original_price, discounted_price, description, details, original_quantity, \
             current_quantity, status, units_sold, freebies) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        let row: ProductRow = sqlx::query_as(&sql)
            .bind(&input.name)
            .bind(Json(&input.images))
            .bind(input.discount_percent)
            .bind(input.supplier_price)
            .bind(input.original_price)
            .bind(input.discounted_price)
            .bind(&input.description)
            .bind(&input.details)
            .bind(input.original_quantity)
            .bind(input.current_quantity)
            .bind(input.status.as_str())
            .bind(input.units_sold)
            .bind(Json(&input.freebies))
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// List products, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        sort: ProductSort,
        search: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE status <> 'DEL' AND ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY {}",
            sort.order_clause()
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(search.map(|s| format!("%{s}%")))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by ID regardless of status.
    ///
    /// Used by update paths and the stock adjustment, which must still see
    /// soft-deleted rows referenced by old orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a product by ID, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_visible(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND status <> 'DEL'");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Patch a product; `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             images = COALESCE($3, images), \
             discount_percent = COALESCE($4, discount_percent), \
             supplier_price = COALESCE($5, supplier_price), \
             original_price = COALESCE($6, original_price), \
             discounted_price = COALESCE($7, discounted_price), \
             description = COALESCE($8, description), \
             details = COALESCE($9, details), \
             units_sold = COALESCE($10, units_sold), \
             freebies = COALESCE($11, freebies), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.images.as_ref().map(Json))
            .bind(input.discount_percent)
            .bind(input.supplier_price)
            .bind(input.original_price)
            .bind(input.discounted_price)
            .bind(input.description.as_deref())
            .bind(input.details.as_ref())
            .bind(input.units_sold)
            .bind(input.freebies.as_ref().map(Json))
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set product stock counters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update_quantity(
        &self,
        id: ProductId,
        input: &UpdateQuantityInput,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET \
             original_quantity = COALESCE($2, original_quantity), \
             current_quantity = COALESCE($3, current_quantity), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.original_quantity)
            .bind(input.current_quantity)
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set the product status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ProductId,
        status: CatalogStatus,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Write a product row back in full (read-modify-write save).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET \
             name = $2, images = $3, discount_percent = $4, supplier_price = $5, \
             original_price = $6, discounted_price = $7, description = $8, details = $9, \
             original_quantity = $10, current_quantity = $11, status = $12, \
             units_sold = $13, freebies = $14, updated_at = now() \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(Json(&product.images))
        .bind(product.discount_percent)
        .bind(product.supplier_price)
        .bind(product.original_price)
        .bind(product.discounted_price)
        .bind(&product.description)
        .bind(&product.details)
        .bind(product.original_quantity)
        .bind(product.current_quantity)
        .bind(product.status.as_str())
        .bind(product.units_sold)
        .bind(Json(&product.freebies))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Expense rows (supplier cost x intake quantity) for products created
    /// in the given month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_expense_rows(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<ExpenseRow>, RepositoryError> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(
            "SELECT name, supplier_price AS unit_cost, original_quantity AS quantity \
             FROM products \
             WHERE EXTRACT(YEAR FROM created_at)::int = $1 \
               AND EXTRACT(MONTH FROM created_at)::int = $2 \
             ORDER BY name ASC",
        )
        .bind(year)
        .bind(i32::try_from(month).unwrap_or_default())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
