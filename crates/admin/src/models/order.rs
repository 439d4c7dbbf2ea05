//! Order domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::{LineItem, OrderId, OrderStatus};

/// A customer order.
///
/// Customer and shipping address arrive from the storefront as free-form
/// JSON documents and are stored verbatim (JSONB); line items are embedded
/// in the order rather than persisted as rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer document (name, email, contact number, ...).
    pub customer: serde_json::Value,
    /// Shipping address document.
    pub shipping_address: serde_json::Value,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Order total.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Courier tracking id (free text).
    pub tracking_id: String,
    /// Internal notes (free text).
    pub notes: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub customer: serde_json::Value,
    pub shipping_address: serde_json::Value,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    /// Defaults to [`OrderStatus::Pending`] when omitted.
    #[serde(default)]
    pub status: OrderStatus,
}

/// Input for patching an order. `None` fields are left unchanged.
///
/// When both `items` and `status` are present, the stock adjustment runs
/// before the order row itself is written (see
/// [`crate::services::inventory`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderInput {
    pub customer: Option<serde_json::Value>,
    pub shipping_address: Option<serde_json::Value>,
    pub items: Option<Vec<LineItem>>,
    pub total: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub tracking_id: Option<String>,
    pub notes: Option<String>,
}

/// One entry in the best-selling products report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSellingProduct {
    /// Product id as recorded in the order items.
    pub product_id: String,
    /// Product name as recorded in the order items.
    pub product_name: String,
    /// Total sales amount (quantity x discounted price).
    pub total_sales: Decimal,
    /// Total units ordered.
    pub total_order_quantity: i64,
}

/// Sort options for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    AToZ,
    ZToA,
    DateHighToLow,
    DateLowToHigh,
}

impl OrderSort {
    /// Parse the query-string form; unknown values fall back to A-to-Z.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ZTOA" => Self::ZToA,
            "ORDER_DATE_HIGH_TO_LOW" => Self::DateHighToLow,
            "ORDER_DATE_LOW_TO_HIGH" => Self::DateLowToHigh,
            _ => Self::AToZ,
        }
    }

    /// The ORDER BY clause for this sort. Alphabetical sorts go by the
    /// customer's last name inside the JSONB document.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::AToZ => "customer->>'lastName' ASC",
            Self::ZToA => "customer->>'lastName' DESC",
            Self::DateHighToLow => "created_at DESC",
            Self::DateLowToHigh => "created_at ASC",
        }
    }
}
