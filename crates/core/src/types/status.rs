//! Status enums for the entities managed by the admin API.
//!
//! Statuses are persisted as short text codes (`ACT`, `PEN`, ...) and the
//! enums here are the only place those codes are interpreted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored or submitted status code is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status code: {0}")]
pub struct ParseStatusError(pub String);

/// Order lifecycle status.
///
/// `Active`, `Pending` and `Cancelled` are pre-fulfillment states;
/// `Shipped` and `Delivered` are fulfillment states. The distinction drives
/// the stock adjustment in [`OrderStatus::stock_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[serde(rename = "ACT")]
    Active,
    #[default]
    #[serde(rename = "PEN")]
    Pending,
    #[serde(rename = "CAN")]
    Cancelled,
    #[serde(rename = "SHP")]
    Shipped,
    #[serde(rename = "DLV")]
    Delivered,
}

/// Direction in which a status change moves stock counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockDirection {
    /// Fulfillment started: subtract line-item quantities from stock.
    Decrement,
    /// Fulfillment undone: add line-item quantities back to stock.
    Increment,
    /// The transition does not touch stock.
    Unchanged,
}

impl OrderStatus {
    /// The persisted short code for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACT",
            Self::Pending => "PEN",
            Self::Cancelled => "CAN",
            Self::Shipped => "SHP",
            Self::Delivered => "DLV",
        }
    }

    /// Whether this status counts as fulfilled (shipped or delivered).
    #[must_use]
    pub const fn is_fulfillment(self) -> bool {
        matches!(self, Self::Shipped | Self::Delivered)
    }

    /// Classify a status transition for inventory purposes.
    ///
    /// Exactly two transition shapes move stock: entering fulfillment
    /// (pre-fulfillment -> SHP/DLV) decrements, and leaving fulfillment
    /// (SHP/DLV -> pre-fulfillment) increments. Every other pair -
    /// including SHP->DLV and same-status updates - leaves counters alone.
    #[must_use]
    pub const fn stock_direction(previous: Self, next: Self) -> StockDirection {
        match (previous.is_fulfillment(), next.is_fulfillment()) {
            (false, true) => StockDirection::Decrement,
            (true, false) => StockDirection::Increment,
            _ => StockDirection::Unchanged,
        }
    }

    /// All order statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Pending,
        Self::Cancelled,
        Self::Shipped,
        Self::Delivered,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACT" => Ok(Self::Active),
            "PEN" => Ok(Self::Pending),
            "CAN" => Ok(Self::Cancelled),
            "SHP" => Ok(Self::Shipped),
            "DLV" => Ok(Self::Delivered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Status shared by catalog entities (products, freebies, reviews).
///
/// Listings exclude `Deleted` rows; deletion is a status flip, never a
/// physical DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CatalogStatus {
    #[default]
    #[serde(rename = "ACT")]
    Active,
    #[serde(rename = "INA")]
    Inactive,
    #[serde(rename = "DEL")]
    Deleted,
}

impl CatalogStatus {
    /// The persisted short code for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACT",
            Self::Inactive => "INA",
            Self::Deleted => "DEL",
        }
    }
}

impl std::fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CatalogStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACT" => Ok(Self::Active),
            "INA" => Ok(Self::Inactive),
            "DEL" => Ok(Self::Deleted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use OrderStatus::{Active, Cancelled, Delivered, Pending, Shipped};

    #[test]
    fn test_order_status_codes_round_trip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().expect("own code parses");
            assert_eq!(parsed, status);
        }
        assert!("XXX".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_catalog_status_codes_round_trip() {
        for status in [
            CatalogStatus::Active,
            CatalogStatus::Inactive,
            CatalogStatus::Deleted,
        ] {
            let parsed: CatalogStatus = status.as_str().parse().expect("own code parses");
            assert_eq!(parsed, status);
        }
        assert!("GONE".parse::<CatalogStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_short_code() {
        let json = serde_json::to_string(&Shipped).expect("serializes");
        assert_eq!(json, "\"SHP\"");
        let back: OrderStatus = serde_json::from_str("\"DLV\"").expect("deserializes");
        assert_eq!(back, Delivered);
    }

    /// The full 25-pair transition matrix: forward transitions decrement,
    /// reverse transitions increment, everything else is a no-op.
    #[test]
    fn test_stock_direction_matrix_is_exhaustive() {
        for previous in OrderStatus::ALL {
            for next in OrderStatus::ALL {
                let expected = match (previous, next) {
                    (Active | Pending | Cancelled, Shipped | Delivered) => {
                        StockDirection::Decrement
                    }
                    (Shipped | Delivered, Active | Pending | Cancelled) => {
                        StockDirection::Increment
                    }
                    _ => StockDirection::Unchanged,
                };
                assert_eq!(
                    OrderStatus::stock_direction(previous, next),
                    expected,
                    "transition {previous} -> {next}"
                );
            }
        }
    }

    #[test]
    fn test_fulfillment_to_fulfillment_is_noop() {
        assert_eq!(
            OrderStatus::stock_direction(Shipped, Delivered),
            StockDirection::Unchanged
        );
        assert_eq!(
            OrderStatus::stock_direction(Delivered, Shipped),
            StockDirection::Unchanged
        );
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in OrderStatus::ALL {
            assert_eq!(
                OrderStatus::stock_direction(status, status),
                StockDirection::Unchanged
            );
        }
    }
}
