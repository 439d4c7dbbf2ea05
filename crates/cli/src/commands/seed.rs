//! Seed the catalog with sample data for local development.
//!
//! Inserts a couple of products and freebies through the same repositories
//! the admin API uses, so the seed exercises the real write paths.

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use meridian_admin::db::{self, FreebieRepository, ProductRepository, RepositoryError};
use meridian_admin::models::freebie::CreateFreebieInput;
use meridian_admin::models::product::CreateProductInput;
use meridian_core::CatalogStatus;

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

fn sample_products() -> Vec<CreateProductInput> {
    vec![
        CreateProductInput {
            name: "Solstice Field Watch".to_string(),
            images: vec!["https://cdn.meridianstore.co/solstice-field.jpg".to_string()],
            discount_percent: Decimal::from(17),
            supplier_price: Decimal::from(60),
            original_price: Decimal::from(180),
            discounted_price: Decimal::from(149),
            description: "38mm field watch with a sapphire crystal".to_string(),
            details: serde_json::json!({
                "movement": "automatic",
                "waterResistance": "10 ATM"
            }),
            original_quantity: Decimal::from(50),
            current_quantity: Decimal::from(50),
            status: CatalogStatus::Active,
            units_sold: Decimal::ZERO,
            freebies: vec!["Keychain".to_string()],
        },
        CreateProductInput {
            name: "Meridian Diver 200".to_string(),
            images: vec!["https://cdn.meridianstore.co/diver-200.jpg".to_string()],
            discount_percent: Decimal::from(10),
            supplier_price: Decimal::from(95),
            original_price: Decimal::from(260),
            discounted_price: Decimal::from(234),
            description: "200m diver with a unidirectional bezel".to_string(),
            details: serde_json::json!({
                "movement": "automatic",
                "waterResistance": "20 ATM"
            }),
            original_quantity: Decimal::from(30),
            current_quantity: Decimal::from(30),
            status: CatalogStatus::Active,
            units_sold: Decimal::ZERO,
            freebies: vec![],
        },
    ]
}

fn sample_freebies() -> Vec<CreateFreebieInput> {
    vec![
        CreateFreebieInput {
            name: "Keychain".to_string(),
            image: "https://cdn.meridianstore.co/keychain.jpg".to_string(),
            store_price: Decimal::from(5),
            original_quantity: Decimal::from(200),
            current_quantity: Decimal::from(200),
            status: CatalogStatus::Active,
        },
        CreateFreebieInput {
            name: "Leather Strap".to_string(),
            image: "https://cdn.meridianstore.co/leather-strap.jpg".to_string(),
            store_price: Decimal::from(18),
            original_quantity: Decimal::from(80),
            current_quantity: Decimal::from(80),
            status: CatalogStatus::Active,
        },
    ]
}

/// Insert sample products and freebies.
///
/// # Errors
///
/// Returns error if `DATABASE_URL` is unset or an insert fails. Freebie
/// name conflicts are skipped so the command can be re-run.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;

    let freebie_repo = FreebieRepository::new(&pool);
    for input in sample_freebies() {
        match freebie_repo.create(&input).await {
            Ok(freebie) => tracing::info!(name = %freebie.name, "Seeded freebie"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(name = %input.name, "Freebie already present, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let product_repo = ProductRepository::new(&pool);
    for input in sample_products() {
        let product = product_repo.create(&input).await?;
        tracing::info!(name = %product.name, id = %product.id, "Seeded product");
    }

    tracing::info!("Seed complete");
    Ok(())
}
