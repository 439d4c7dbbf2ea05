//! Database operations for the admin `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `products` - Catalog products with stock counters and JSONB image/detail documents
//! - `freebies` - Bundled giveaways, looked up by name from order line items
//! - `orders` - Orders with JSONB customer/address documents and embedded line items
//! - `product_reviews` - Customer reviews per product
//! - `home_images` - Homepage image carousels
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p meridian-cli -- migrate
//! ```

pub mod freebies;
pub mod home_images;
pub mod orders;
pub mod products;
pub mod reviews;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use freebies::FreebieRepository;
pub use home_images::HomeImageRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique freebie name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Parse a stored status code, mapping failures to
/// [`RepositoryError::DataCorruption`].
pub(crate) fn decode_status<T: std::str::FromStr>(
    column: &str,
    raw: &str,
) -> Result<T, RepositoryError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| RepositoryError::DataCorruption(format!("{column}: {e}")))
}
