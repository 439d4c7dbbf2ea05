//! Database operations for homepage images.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use meridian_core::HomeImageId;

use super::RepositoryError;
use crate::models::home_image::HomeImage;

/// Column list shared by every home image query.
const COLUMNS: &str = "id, images, created_at, updated_at";

/// Internal row type for home image queries.
#[derive(Debug, sqlx::FromRow)]
struct HomeImageRow {
    id: Uuid,
    images: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HomeImageRow> for HomeImage {
    fn from(row: HomeImageRow) -> Self {
        Self {
            id: HomeImageId::new(row.id),
            images: row.images.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for homepage image database operations.
pub struct HomeImageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HomeImageRepository<'a> {
    /// Create a new home image repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new image set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub async fn create(&self, images: &[String]) -> Result<HomeImage, RepositoryError> {
        let sql = format!("INSERT INTO home_images (images) VALUES ($1) RETURNING {COLUMNS}");
        let row: HomeImageRow = sqlx::query_as(&sql)
            .bind(Json(images))
            .fetch_one(self.pool)
            .await?;

        Ok(row.into())
    }

    /// List all image sets.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<HomeImage>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM home_images ORDER BY created_at ASC");
        let rows: Vec<HomeImageRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace the images of a set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub async fn replace_images(
        &self,
        id: HomeImageId,
        images: &[String],
    ) -> Result<HomeImage, RepositoryError> {
        let sql = format!(
            "UPDATE home_images SET images = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<HomeImageRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(Json(images))
            .fetch_optional(self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete an image set.
    ///
    /// # Returns
    ///
    /// Returns `true` if the row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: HomeImageId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM home_images WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
