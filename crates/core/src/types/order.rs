//! Order line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry within an order's item list.
///
/// Line items are embedded in the order document (JSONB), not persisted as
/// rows of their own, and arrive from the storefront with camelCase keys.
/// `product_id` is kept as the raw string the client sent; it is parsed
/// into a [`crate::ProductId`] only when stock is adjusted, so a malformed
/// id fails the adjustment rather than the deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Raw product id token (expected to be a UUID).
    pub product_id: String,
    /// Name of the bundled freebie; empty when the item carries none.
    #[serde(default)]
    pub freebies: String,
    /// Number of units ordered.
    pub quantity: i64,
    /// Product display name at order time.
    pub product_name: String,
    /// Per-unit discounted price at order time.
    pub discounted_price: Decimal,
}

impl LineItem {
    /// Whether this item carries a bundled freebie.
    #[must_use]
    pub fn has_freebie(&self) -> bool {
        !self.freebies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_deserializes_storefront_shape() {
        let json = r#"{
            "productId": "9f9c41bc-1761-44f5-9b9f-2e5a1f2b1a77",
            "freebies": "Keychain",
            "quantity": 3,
            "productName": "Solstice Field Watch",
            "discountedPrice": "149.00"
        }"#;
        let item: LineItem = serde_json::from_str(json).expect("deserializes");
        assert_eq!(item.quantity, 3);
        assert!(item.has_freebie());
        assert_eq!(item.product_name, "Solstice Field Watch");
    }

    #[test]
    fn test_missing_freebies_field_defaults_to_none() {
        let json = r#"{
            "productId": "9f9c41bc-1761-44f5-9b9f-2e5a1f2b1a77",
            "quantity": 1,
            "productName": "Solstice Field Watch",
            "discountedPrice": "149.00"
        }"#;
        let item: LineItem = serde_json::from_str(json).expect("deserializes");
        assert!(!item.has_freebie());
    }
}
