//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::{CatalogStatus, ProductId};

/// A catalog product.
///
/// `current_quantity` is the live stock counter and is deliberately signed:
/// status transitions on orders adjust it without clamping, so it can go
/// negative or exceed `original_quantity` under concurrent updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URLs.
    pub images: Vec<String>,
    /// Discount percentage applied to the original price.
    pub discount_percent: Decimal,
    /// Per-unit cost from the supplier.
    pub supplier_price: Decimal,
    /// Listed price before discount.
    pub original_price: Decimal,
    /// Listed price after discount.
    pub discounted_price: Decimal,
    /// Short description shown in listings.
    pub description: String,
    /// Structured long-form description document.
    pub details: serde_json::Value,
    /// Stock level at intake.
    pub original_quantity: Decimal,
    /// Live stock counter.
    pub current_quantity: Decimal,
    /// Catalog status.
    pub status: CatalogStatus,
    /// Units sold counter.
    pub units_sold: Decimal,
    /// Names of freebies bundled with this product.
    pub freebies: Vec<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub discount_percent: Decimal,
    pub supplier_price: Decimal,
    pub original_price: Decimal,
    pub discounted_price: Decimal,
    pub description: String,
    #[serde(default)]
    pub details: serde_json::Value,
    pub original_quantity: Decimal,
    pub current_quantity: Decimal,
    #[serde(default)]
    pub status: CatalogStatus,
    #[serde(default)]
    pub units_sold: Decimal,
    #[serde(default)]
    pub freebies: Vec<String>,
}

/// Input for patching a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    pub discount_percent: Option<Decimal>,
    pub supplier_price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    pub description: Option<String>,
    pub details: Option<serde_json::Value>,
    pub units_sold: Option<Decimal>,
    pub freebies: Option<Vec<String>>,
}

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    AToZ,
    ZToA,
    PriceHighToLow,
    PriceLowToHigh,
    QuantityHighToLow,
    QuantityLowToHigh,
    SupplierHighToLow,
    SupplierLowToHigh,
}

impl ProductSort {
    /// Parse the query-string form; unknown values fall back to A-to-Z,
    /// matching the storefront's behavior of always sending something.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ZTOA" => Self::ZToA,
            "PRICE_HIGH_TO_LOW" => Self::PriceHighToLow,
            "PRICE_LOW_TO_HIGH" => Self::PriceLowToHigh,
            "QUANTITY_HIGH_TO_LOW" => Self::QuantityHighToLow,
            "QUANTITY_LOW_TO_HIGH" => Self::QuantityLowToHigh,
            "SUPPLIER_HIGH_TO_LOW" => Self::SupplierHighToLow,
            "SUPPLIER_LOW_TO_HIGH" => Self::SupplierLowToHigh,
            _ => Self::AToZ,
        }
    }

    /// The ORDER BY clause for this sort. Static strings only - never
    /// interpolate user input here.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::AToZ => "name ASC",
            Self::ZToA => "name DESC",
            Self::PriceHighToLow => "discounted_price DESC",
            Self::PriceLowToHigh => "discounted_price ASC",
            Self::QuantityHighToLow => "current_quantity DESC",
            Self::QuantityLowToHigh => "current_quantity ASC",
            Self::SupplierHighToLow => "supplier_price DESC",
            Self::SupplierLowToHigh => "supplier_price ASC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_param_parsing_is_case_insensitive() {
        assert_eq!(
            ProductSort::from_param("price_high_to_low"),
            ProductSort::PriceHighToLow
        );
        assert_eq!(ProductSort::from_param("ZTOA"), ProductSort::ZToA);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_atoz() {
        assert_eq!(ProductSort::from_param("bogus"), ProductSort::AToZ);
        assert_eq!(ProductSort::from_param(""), ProductSort::AToZ);
    }
}
