//! Database operations for freebies.
//!
//! Freebies are keyed by ID like everything else, but order line items
//! reference them by name, so `find_by_name` is part of the contract too.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use meridian_core::{CatalogStatus, FreebieId};

use super::{RepositoryError, decode_status};
use crate::models::freebie::{
    CreateFreebieInput, Freebie, FreebieDropdownEntry, FreebieSort, UpdateFreebieInput,
};
use crate::models::UpdateQuantityInput;
use crate::models::report::ExpenseRow;

/// Column list shared by every freebie query.
const COLUMNS: &str = "id, name, image, store_price, original_quantity, current_quantity, \
     status, created_at, updated_at";

/// Internal row type for freebie queries.
#[derive(Debug, sqlx::FromRow)]
struct FreebieRow {
    id: Uuid,
    name: String,
    image: String,
    store_price: Decimal,
    original_quantity: Decimal,
    current_quantity: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FreebieRow> for Freebie {
    type Error = RepositoryError;

    fn try_from(row: FreebieRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FreebieId::new(row.id),
            name: row.name,
            image: row.image,
            store_price: row.store_price,
            original_quantity: row.original_quantity,
            current_quantity: row.current_quantity,
            status: decode_status("freebies.status", &row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for freebie database operations.
pub struct FreebieRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FreebieRepository<'a> {
    /// Create a new freebie repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new freebie.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CreateFreebieInput) -> Result<Freebie, RepositoryError> {
        let sql = format!(
            "INSERT INTO freebies (name, image, store_price, original_quantity, \
             current_quantity, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row: FreebieRow = sqlx::query_as(&sql)
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.store_price)
            .bind(input.original_quantity)
            .bind(input.current_quantity)
            .bind(input.status.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("freebies_name_key")
                {
                    return RepositoryError::Conflict(format!(
                        "freebie name {:?} already exists",
                        input.name
                    ));
                }
                RepositoryError::Database(e)
            })?;

        row.try_into()
    }

    /// List freebies, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        sort: FreebieSort,
        search: Option<&str>,
    ) -> Result<Vec<Freebie>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM freebies \
             WHERE status <> 'DEL' AND ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY {}",
            sort.order_clause()
        );
        let rows: Vec<FreebieRow> = sqlx::query_as(&sql)
            .bind(search.map(|s| format!("%{s}%")))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List active freebies as id + name pairs for dropdown pickers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn dropdown(&self) -> Result<Vec<FreebieDropdownEntry>, RepositoryError> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT id, name FROM freebies WHERE status = 'ACT' ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| FreebieDropdownEntry {
                id: FreebieId::new(id),
                name,
            })
            .collect())
    }

    /// Get a freebie by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: FreebieId) -> Result<Option<Freebie>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM freebies WHERE id = $1");
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a freebie by ID, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_visible(&self, id: FreebieId) -> Result<Option<Freebie>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM freebies WHERE id = $1 AND status <> 'DEL'");
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up a freebie by its name, the key order line items carry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Freebie>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM freebies WHERE name = $1");
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Patch a freebie; `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the freebie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: FreebieId,
        input: &UpdateFreebieInput,
    ) -> Result<Freebie, RepositoryError> {
        let sql = format!(
            "UPDATE freebies SET \
             name = COALESCE($2, name), \
             image = COALESCE($3, image), \
             store_price = COALESCE($4, store_price), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.image.as_deref())
            .bind(input.store_price)
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set freebie stock counters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the freebie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update_quantity(
        &self,
        id: FreebieId,
        input: &UpdateQuantityInput,
    ) -> Result<Freebie, RepositoryError> {
        let sql = format!(
            "UPDATE freebies SET \
             original_quantity = COALESCE($2, original_quantity), \
             current_quantity = COALESCE($3, current_quantity), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.original_quantity)
            .bind(input.current_quantity)
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set the freebie status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the freebie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: FreebieId,
        status: CatalogStatus,
    ) -> Result<Freebie, RepositoryError> {
        let sql = format!(
            "UPDATE freebies SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<FreebieRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Write a freebie row back in full (read-modify-write save).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the freebie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save(&self, freebie: &Freebie) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE freebies SET \
             name = $2, image = $3, store_price = $4, original_quantity = $5, \
             current_quantity = $6, status = $7, updated_at = now() \
             WHERE id = $1",
        )
        .bind(freebie.id)
        .bind(&freebie.name)
        .bind(&freebie.image)
        .bind(freebie.store_price)
        .bind(freebie.original_quantity)
        .bind(freebie.current_quantity)
        .bind(freebie.status.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Expense rows (store price x intake quantity) for freebies created in
    /// the given month.
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
            "SELECT name, store_price AS unit_cost, original_quantity AS quantity \
             FROM freebies \
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
