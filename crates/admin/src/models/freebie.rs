//! Freebie domain models.
//!
//! Freebies are giveaway items bundled with products. Order line items
//! reference them by name, not by ID, so `name` is effectively a second key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::{CatalogStatus, FreebieId};

/// A giveaway item bundled with products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freebie {
    /// Unique freebie ID.
    pub id: FreebieId,
    /// Display name; the lookup key used by order line items.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// What the item costs in-store.
    pub store_price: Decimal,
    /// Stock level at intake.
    pub original_quantity: Decimal,
    /// Live stock counter (signed, unclamped - same as products).
    pub current_quantity: Decimal,
    /// Catalog status.
    pub status: CatalogStatus,
    /// When the freebie was created.
    pub created_at: DateTime<Utc>,
    /// When the freebie was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new freebie.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFreebieInput {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub store_price: Decimal,
    pub original_quantity: Decimal,
    pub current_quantity: Decimal,
    #[serde(default)]
    pub status: CatalogStatus,
}

/// Input for patching a freebie. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFreebieInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub store_price: Option<Decimal>,
}

/// A minimal id + name pair for dropdown pickers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreebieDropdownEntry {
    pub id: FreebieId,
    pub name: String,
}

/// Sort options for freebie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreebieSort {
    #[default]
    AToZ,
    ZToA,
    PriceHighToLow,
    PriceLowToHigh,
    QuantityHighToLow,
    QuantityLowToHigh,
}

impl FreebieSort {
    /// Parse the query-string form; unknown values fall back to A-to-Z.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ZTOA" => Self::ZToA,
            "PRICE_HIGH_TO_LOW" => Self::PriceHighToLow,
            "PRICE_LOW_TO_HIGH" => Self::PriceLowToHigh,
            "QUANTITY_HIGH_TO_LOW" => Self::QuantityHighToLow,
            "QUANTITY_LOW_TO_HIGH" => Self::QuantityLowToHigh,
            _ => Self::AToZ,
        }
    }

    /// The ORDER BY clause for this sort.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::AToZ => "name ASC",
            Self::ZToA => "name DESC",
            Self::PriceHighToLow => "store_price DESC",
            Self::PriceLowToHigh => "store_price ASC",
            Self::QuantityHighToLow => "current_quantity DESC",
            Self::QuantityLowToHigh => "current_quantity ASC",
        }
    }
}
