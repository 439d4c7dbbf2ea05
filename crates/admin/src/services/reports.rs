//! CSV builders for the monthly report exports.
//!
//! These are pure functions over already-fetched rows; the route layer
//! attaches the attachment headers. Fields that can contain commas or
//! quotes (customer documents, product names) go through [`csv_field`].

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::order::{BestSellingProduct, Order};
use crate::models::report::ExpenseRow;

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Revenue report: one row per delivered order, with a grand total.
#[must_use]
pub fn revenue_csv(orders: &[Order]) -> String {
    let mut csv =
        String::from("DATE,ORDER ID,TRACKING ID,CUSTOMER,COMPLETE ADDRESS,PRODUCT,ORDER STATUS,TOTAL\n");
    let mut grand_total = Decimal::ZERO;
    for order in orders {
        let items: Vec<String> = order
            .items
            .iter()
            .map(|item| format!("{} x{}", item.product_name, item.quantity))
            .collect();
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{:.2}",
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
            order.id,
            csv_field(&order.tracking_id),
            csv_field(&order.customer.to_string()),
            csv_field(&order.shipping_address.to_string()),
            csv_field(&items.join("; ")),
            order.status,
            order.total
        );
        grand_total += order.total;
    }
    csv.push('\n');
    let _ = writeln!(csv, ",,,,,,Grand Total:,{grand_total:.2}");
    csv
}

/// Total-orders report: orders per day, with a total.
#[must_use]
pub fn total_orders_csv(counts: &BTreeMap<NaiveDate, i64>) -> String {
    let mut csv = String::from("Date,Orders\n");
    let mut total: i64 = 0;
    for (day, count) in counts {
        let _ = writeln!(csv, "{},{count}", day.format("%m-%d-%Y"));
        total += count;
    }
    csv.push('\n');
    let _ = writeln!(csv, "Total Orders:,{total}");
    csv
}

/// Best-selling products report.
#[must_use]
pub fn best_selling_csv(rows: &[BestSellingProduct]) -> String {
    let mut csv = String::from("Product ID,Product Name,Total Sales,Total Order Quantity\n");
    for row in rows {
        let _ = writeln!(
            csv,
            "{},{},{:.2},{}",
            row.product_id,
            csv_field(&row.product_name),
            row.total_sales,
            row.total_order_quantity
        );
    }
    csv
}

/// Total-expenses report: product intake costs, then freebie intake costs,
/// then a grand total across both.
#[must_use]
pub fn total_expenses_csv(products: &[ExpenseRow], freebies: &[ExpenseRow]) -> String {
    let mut csv = String::from("Product Name,Total Cost\n");
    let mut grand_total = Decimal::ZERO;
    for row in products {
        let _ = writeln!(csv, "{},{:.2}", csv_field(&row.name), row.total());
        grand_total += row.total();
    }
    csv.push('\n');
    csv.push_str("Freebie Name,Total Cost\n");
    for row in freebies {
        let _ = writeln!(csv, "{},{:.2}", csv_field(&row.name), row.total());
        grand_total += row.total();
    }
    csv.push('\n');
    let _ = writeln!(csv, "Grand Total,{grand_total:.2}");
    csv
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use meridian_core::{LineItem, OrderId, OrderStatus};

    use super::*;

    fn order(total: Decimal) -> Order {
        let created = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).single().expect("valid time");
        Order {
            id: OrderId::new(Uuid::nil()),
            customer: serde_json::json!({"firstName": "Ada", "lastName": "Reyes"}),
            shipping_address: serde_json::json!({"city": "Cebu"}),
            items: vec![LineItem {
                product_id: Uuid::nil().to_string(),
                freebies: String::new(),
                quantity: 2,
                product_name: "Solstice Field Watch".to_string(),
                discounted_price: dec!(149),
            }],
            total,
            status: OrderStatus::Delivered,
            tracking_id: "TRK-001".to_string(),
            notes: String::new(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_revenue_csv_totals_orders() {
        let csv = revenue_csv(&[order(dec!(298)), order(dec!(150.50))]);
        assert!(csv.starts_with("DATE,ORDER ID,TRACKING ID"));
        assert!(csv.contains("TRK-001"));
        assert!(csv.contains("Grand Total:,448.50"));
    }

    #[test]
    fn test_revenue_csv_quotes_json_documents() {
        let csv = revenue_csv(&[order(dec!(298))]);
        // The customer JSON contains commas, so the field must be quoted.
        assert!(csv.contains("\"{\"\"firstName\"\":\"\"Ada\"\""));
    }

    #[test]
    fn test_total_orders_csv_counts() {
        let mut counts = BTreeMap::new();
        counts.insert(NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"), 3);
        counts.insert(NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date"), 4);
        let csv = total_orders_csv(&counts);
        assert!(csv.contains("03-02-2026,3"));
        assert!(csv.contains("03-05-2026,4"));
        assert!(csv.contains("Total Orders:,7"));
    }

    #[test]
    fn test_best_selling_csv_rows() {
        let rows = vec![BestSellingProduct {
            product_id: Uuid::nil().to_string(),
            product_name: "Solstice Field Watch".to_string(),
            total_sales: dec!(894),
            total_order_quantity: 6,
        }];
        let csv = best_selling_csv(&rows);
        assert!(csv.contains("Solstice Field Watch,894.00,6"));
    }

    #[test]
    fn test_total_expenses_csv_sums_both_sections() {
        let products = vec![ExpenseRow {
            name: "Solstice Field Watch".to_string(),
            unit_cost: dec!(60),
            quantity: dec!(50),
        }];
        let freebies = vec![ExpenseRow {
            name: "Keychain".to_string(),
            unit_cost: dec!(5),
            quantity: dec!(20),
        }];
        let csv = total_expenses_csv(&products, &freebies);
        assert!(csv.contains("Solstice Field Watch,3000.00"));
        assert!(csv.contains("Keychain,100.00"));
        assert!(csv.contains("Grand Total,3100.00"));
    }

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
