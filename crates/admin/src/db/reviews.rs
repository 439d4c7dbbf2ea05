//! Database operations for product reviews.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use meridian_core::{CatalogStatus, ProductId, ReviewId};

use super::{RepositoryError, decode_status};
use crate::models::review::{CreateReviewInput, Review, ReviewSort, UpdateReviewInput};

/// Column list shared by every review query.
const COLUMNS: &str =
    "id, product_id, reviewer, subject, message, star_rating, status, created_at, updated_at";

/// Internal row type for review queries.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    product_id: Uuid,
    reviewer: String,
    subject: String,
    message: String,
    star_rating: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::new(row.id),
            product_id: ProductId::new(row.product_id),
            reviewer: row.reviewer,
            subject: row.subject,
            message: row.message,
            star_rating: row.star_rating,
            status: decode_status("product_reviews.status", &row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new review. Reviews start active.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, input), fields(product = %input.product_id))]
    pub async fn create(&self, input: &CreateReviewInput) -> Result<Review, RepositoryError> {
        let sql = format!(
            "INSERT INTO product_reviews (product_id, reviewer, subject, message, \
             star_rating, status) \
             VALUES ($1, $2, $3, $4, $5, 'ACT') \
             RETURNING {COLUMNS}"
        );
        let row: ReviewRow = sqlx::query_as(&sql)
            .bind(input.product_id)
            .bind(&input.reviewer)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.star_rating)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// List reviews, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        sort: ReviewSort,
        search: Option<&str>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM product_reviews \
             WHERE status <> 'DEL' AND ($1::text IS NULL OR reviewer ILIKE $1) \
             ORDER BY {}",
            sort.order_clause()
        );
        let rows: Vec<ReviewRow> = sqlx::query_as(&sql)
            .bind(search.map(|s| format!("%{s}%")))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Reviews for one product, newest first, excluding deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM product_reviews \
             WHERE product_id = $1 AND status <> 'DEL' \
             ORDER BY created_at DESC"
        );
        let rows: Vec<ReviewRow> = sqlx::query_as(&sql)
            .bind(product_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Patch a review; `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: ReviewId,
        input: &UpdateReviewInput,
    ) -> Result<Review, RepositoryError> {
        let sql = format!(
            "UPDATE product_reviews SET \
             product_id = COALESCE($2, product_id), \
             reviewer = COALESCE($3, reviewer), \
             subject = COALESCE($4, subject), \
             message = COALESCE($5, message), \
             star_rating = COALESCE($6, star_rating), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(input.product_id)
            .bind(input.reviewer.as_deref())
            .bind(input.subject.as_deref())
            .bind(input.message.as_deref())
            .bind(input.star_rating)
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Set the review status (moderation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ReviewId,
        status: CatalogStatus,
    ) -> Result<Review, RepositoryError> {
        let sql = format!(
            "UPDATE product_reviews SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }
}
