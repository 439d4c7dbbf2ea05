//! Domain models for the admin API.

use rust_decimal::Decimal;
use serde::Deserialize;

use meridian_core::CatalogStatus;

pub mod freebie;
pub mod home_image;
pub mod order;
pub mod product;
pub mod report;
pub mod review;

/// Input for setting stock counters, shared by products and freebies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub original_quantity: Option<Decimal>,
    pub current_quantity: Option<Decimal>,
}

/// Input for setting a catalog status, shared by products, freebies and
/// reviews.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusInput {
    pub status: CatalogStatus,
}
