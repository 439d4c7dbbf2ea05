//! Stock adjustment on order status transitions.
//!
//! When an order moves into fulfillment (ACT/PEN/CAN -> SHP/DLV) each line
//! item's quantity is subtracted from the referenced product's live stock
//! counter, and from the named freebie's counter when the item carries one.
//! Moving back out of fulfillment adds the quantities back. Every other
//! transition - including SHP->DLV - leaves stock alone.
//!
//! Items are processed strictly in order with one read-modify-write cycle
//! per row. A failure part-way through aborts the remaining items and leaves
//! the rows already written as they are; the caller surfaces the error and
//! the operator resolves the partial batch by hand. Counters are not
//! clamped: a counter can go negative or exceed the intake quantity.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use meridian_core::{LineItem, OrderStatus, ProductId, StockDirection};

use crate::db::{FreebieRepository, ProductRepository, RepositoryError};
use crate::models::freebie::Freebie;
use crate::models::product::Product;

/// Errors from a stock adjustment batch.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A line item's product id is not a valid UUID.
    #[error("invalid product id {raw:?} in line item")]
    InvalidProductId {
        raw: String,
        #[source]
        source: uuid::Error,
    },

    /// A line item references a product that does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// A line item references a freebie name that does not exist.
    #[error("freebie {0:?} not found")]
    FreebieNotFound(String),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Read/write access to the stock counters.
///
/// The admin binary uses [`PgStockStore`]; tests use an in-memory double.
/// Finds return `None` for missing rows so the service can attach which
/// item was missing to the error.
pub trait StockStore {
    /// Fetch a product by id, regardless of catalog status.
    async fn product_by_id(&self, id: ProductId)
    -> Result<Option<Product>, RepositoryError>;

    /// Persist a product row.
    async fn save_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Fetch a freebie by its name, regardless of catalog status.
    async fn freebie_by_name(&self, name: &str) -> Result<Option<Freebie>, RepositoryError>;

    /// Persist a freebie row.
    async fn save_freebie(&self, freebie: &Freebie) -> Result<(), RepositoryError>;
}

/// [`StockStore`] backed by the `PostgreSQL` repositories.
pub struct PgStockStore<'a> {
    pool: &'a sqlx::PgPool,
}

impl<'a> PgStockStore<'a> {
    /// Create a store over a connection pool.
    #[must_use]
    pub const fn new(pool: &'a sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl StockStore for PgStockStore<'_> {
    async fn product_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(self.pool).get(id).await
    }

    async fn save_product(&self, product: &Product) -> Result<(), RepositoryError> {
        ProductRepository::new(self.pool).save(product).await
    }

    async fn freebie_by_name(&self, name: &str) -> Result<Option<Freebie>, RepositoryError> {
        FreebieRepository::new(self.pool).find_by_name(name).await
    }

    async fn save_freebie(&self, freebie: &Freebie) -> Result<(), RepositoryError> {
        FreebieRepository::new(self.pool).save(freebie).await
    }
}

/// Adjust stock counters for an order status change.
///
/// Classifies the `previous -> next` transition and, when it moves stock,
/// walks `items` in order applying one read-modify-write cycle per product
/// and per referenced freebie. Returns on the first failure without undoing
/// earlier writes.
///
/// # Errors
///
/// - [`InventoryError::InvalidProductId`] when an item's product id does not
///   parse as a UUID.
/// - [`InventoryError::ProductNotFound`] / [`InventoryError::FreebieNotFound`]
///   when a referenced row is missing.
/// - [`InventoryError::Store`] when a read or write fails.
#[instrument(
    skip(store, items),
    fields(previous = %previous, next = %next, items = items.len())
)]
pub async fn adjust_for_status_change<S: StockStore>(
    store: &S,
    previous: OrderStatus,
    next: OrderStatus,
    items: &[LineItem],
) -> Result<(), InventoryError> {
    let direction = OrderStatus::stock_direction(previous, next);
    if direction == StockDirection::Unchanged {
        return Ok(());
    }

    for item in items {
        let product_id: ProductId =
            item.product_id
                .parse()
                .map_err(|source| InventoryError::InvalidProductId {
                    raw: item.product_id.clone(),
                    source,
                })?;

        let mut product = store
            .product_by_id(product_id)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id))?;
        product.current_quantity = apply(direction, product.current_quantity, item.quantity);
        store.save_product(&product).await?;
        tracing::debug!(
            product = %product_id,
            quantity = item.quantity,
            current = %product.current_quantity,
            "product stock adjusted"
        );

        if item.has_freebie() {
            let mut freebie = store
                .freebie_by_name(&item.freebies)
                .await?
                .ok_or_else(|| InventoryError::FreebieNotFound(item.freebies.clone()))?;
            freebie.current_quantity =
                apply(direction, freebie.current_quantity, item.quantity);
            store.save_freebie(&freebie).await?;
            tracing::debug!(
                freebie = %item.freebies,
                quantity = item.quantity,
                current = %freebie.current_quantity,
                "freebie stock adjusted"
            );
        }
    }

    Ok(())
}

fn apply(direction: StockDirection, current: Decimal, quantity: i64) -> Decimal {
    let delta = Decimal::from(quantity);
    match direction {
        StockDirection::Decrement => current - delta,
        StockDirection::Increment => current + delta,
        StockDirection::Unchanged => current,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use meridian_core::{CatalogStatus, FreebieId};

    use super::*;

    /// In-memory [`StockStore`] keyed like the real one: products by id,
    /// freebies by name.
    #[derive(Default)]
    struct MemoryStore {
        products: Mutex<HashMap<Uuid, Product>>,
        freebies: Mutex<HashMap<String, Freebie>>,
    }

    impl MemoryStore {
        fn with_product(self, product: Product) -> Self {
            self.products
                .lock()
                .expect("lock poisoned")
                .insert(product.id.as_uuid(), product);
            self
        }

        fn with_freebie(self, freebie: Freebie) -> Self {
            self.freebies
                .lock()
                .expect("lock poisoned")
                .insert(freebie.name.clone(), freebie);
            self
        }

        fn product_quantity(&self, id: ProductId) -> Decimal {
            self.products
                .lock()
                .expect("lock poisoned")
                .get(&id.as_uuid())
                .expect("product exists")
                .current_quantity
        }

        fn freebie_quantity(&self, name: &str) -> Decimal {
            self.freebies
                .lock()
                .expect("lock poisoned")
                .get(name)
                .expect("freebie exists")
                .current_quantity
        }
    }

    impl StockStore for MemoryStore {
        async fn product_by_id(
            &self,
            id: ProductId,
        ) -> Result<Option<Product>, RepositoryError> {
            Ok(self
                .products
                .lock()
                .expect("lock poisoned")
                .get(&id.as_uuid())
                .cloned())
        }

        async fn save_product(&self, product: &Product) -> Result<(), RepositoryError> {
            self.products
                .lock()
                .expect("lock poisoned")
                .insert(product.id.as_uuid(), product.clone());
            Ok(())
        }

        async fn freebie_by_name(
            &self,
            name: &str,
        ) -> Result<Option<Freebie>, RepositoryError> {
            Ok(self
                .freebies
                .lock()
                .expect("lock poisoned")
                .get(name)
                .cloned())
        }

        async fn save_freebie(&self, freebie: &Freebie) -> Result<(), RepositoryError> {
            self.freebies
                .lock()
                .expect("lock poisoned")
                .insert(freebie.name.clone(), freebie.clone());
            Ok(())
        }
    }

    fn product(id: ProductId, current_quantity: Decimal) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: "Solstice Field Watch".to_string(),
            images: vec![],
            discount_percent: dec!(10),
            supplier_price: dec!(60),
            original_price: dec!(180),
            discounted_price: dec!(149),
            description: String::new(),
            details: serde_json::Value::Null,
            original_quantity: dec!(50),
            current_quantity,
            status: CatalogStatus::Active,
            units_sold: dec!(0),
            freebies: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn freebie(name: &str, current_quantity: Decimal) -> Freebie {
        let now = Utc::now();
        Freebie {
            id: FreebieId::new(Uuid::new_v4()),
            name: name.to_string(),
            image: String::new(),
            store_price: dec!(5),
            original_quantity: dec!(20),
            current_quantity,
            status: CatalogStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn item(product_id: ProductId, quantity: i64, freebies: &str) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            freebies: freebies.to_string(),
            quantity,
            product_name: "Solstice Field Watch".to_string(),
            discounted_price: dec!(149),
        }
    }

    #[tokio::test]
    async fn test_forward_transition_decrements_products_and_freebies() {
        let p1 = ProductId::new(Uuid::new_v4());
        let p2 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default()
            .with_product(product(p1, dec!(10)))
            .with_product(product(p2, dec!(8)))
            .with_freebie(freebie("Keychain", dec!(5)));

        let items = vec![item(p1, 3, ""), item(p2, 1, "Keychain")];
        adjust_for_status_change(&store, OrderStatus::Pending, OrderStatus::Shipped, &items)
            .await
            .expect("adjustment succeeds");

        assert_eq!(store.product_quantity(p1), dec!(7));
        assert_eq!(store.product_quantity(p2), dec!(7));
        assert_eq!(store.freebie_quantity("Keychain"), dec!(4));
    }

    #[tokio::test]
    async fn test_reverse_transition_increments_back() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default()
            .with_product(product(p1, dec!(7)))
            .with_freebie(freebie("Keychain", dec!(4)));

        let items = vec![item(p1, 3, "Keychain")];
        adjust_for_status_change(&store, OrderStatus::Shipped, OrderStatus::Active, &items)
            .await
            .expect("adjustment succeeds");

        assert_eq!(store.product_quantity(p1), dec!(10));
        assert_eq!(store.freebie_quantity("Keychain"), dec!(7));
    }

    #[tokio::test]
    async fn test_forward_then_reverse_round_trips() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default()
            .with_product(product(p1, dec!(10)))
            .with_freebie(freebie("Keychain", dec!(5)));

        let items = vec![item(p1, 4, "Keychain")];
        adjust_for_status_change(&store, OrderStatus::Active, OrderStatus::Delivered, &items)
            .await
            .expect("forward succeeds");
        adjust_for_status_change(
            &store,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            &items,
        )
        .await
        .expect("reverse succeeds");

        assert_eq!(store.product_quantity(p1), dec!(10));
        assert_eq!(store.freebie_quantity("Keychain"), dec!(5));
    }

    #[tokio::test]
    async fn test_shipped_to_delivered_leaves_stock_alone() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let items = vec![item(p1, 3, "")];
        adjust_for_status_change(&store, OrderStatus::Shipped, OrderStatus::Delivered, &items)
            .await
            .expect("no-op succeeds");

        assert_eq!(store.product_quantity(p1), dec!(10));
    }

    #[tokio::test]
    async fn test_same_status_update_leaves_stock_alone() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let items = vec![item(p1, 3, "")];
        adjust_for_status_change(&store, OrderStatus::Pending, OrderStatus::Pending, &items)
            .await
            .expect("no-op succeeds");

        assert_eq!(store.product_quantity(p1), dec!(10));
    }

    #[tokio::test]
    async fn test_unreferenced_rows_are_untouched() {
        let p1 = ProductId::new(Uuid::new_v4());
        let bystander = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default()
            .with_product(product(p1, dec!(10)))
            .with_product(product(bystander, dec!(99)))
            .with_freebie(freebie("Sticker Pack", dec!(40)));

        let items = vec![item(p1, 2, "")];
        adjust_for_status_change(&store, OrderStatus::Pending, OrderStatus::Shipped, &items)
            .await
            .expect("adjustment succeeds");

        assert_eq!(store.product_quantity(bystander), dec!(99));
        assert_eq!(store.freebie_quantity("Sticker Pack"), dec!(40));
    }

    #[tokio::test]
    async fn test_missing_product_aborts_but_keeps_earlier_writes() {
        let p1 = ProductId::new(Uuid::new_v4());
        let missing = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let items = vec![item(p1, 3, ""), item(missing, 1, "")];
        let err = adjust_for_status_change(
            &store,
            OrderStatus::Pending,
            OrderStatus::Shipped,
            &items,
        )
        .await
        .expect_err("second item fails");

        assert!(matches!(err, InventoryError::ProductNotFound(id) if id == missing));
        // The first item's write is not rolled back.
        assert_eq!(store.product_quantity(p1), dec!(7));
    }

    #[tokio::test]
    async fn test_missing_freebie_aborts_after_product_write() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let items = vec![item(p1, 2, "Ghost Keychain")];
        let err = adjust_for_status_change(
            &store,
            OrderStatus::Pending,
            OrderStatus::Shipped,
            &items,
        )
        .await
        .expect_err("freebie lookup fails");

        assert!(matches!(err, InventoryError::FreebieNotFound(name) if name == "Ghost Keychain"));
        // The product write in the same item sticks.
        assert_eq!(store.product_quantity(p1), dec!(8));
    }

    #[tokio::test]
    async fn test_malformed_product_id_fails_before_any_write() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let mut bad = item(p1, 3, "");
        bad.product_id = "not-a-uuid".to_string();
        let items = vec![bad, item(p1, 1, "")];
        let err = adjust_for_status_change(
            &store,
            OrderStatus::Pending,
            OrderStatus::Shipped,
            &items,
        )
        .await
        .expect_err("malformed id fails");

        assert!(matches!(err, InventoryError::InvalidProductId { ref raw, .. } if raw == "not-a-uuid"));
        assert_eq!(store.product_quantity(p1), dec!(10));
    }

    #[tokio::test]
    async fn test_malformed_id_mid_sequence_keeps_earlier_writes() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(10)));

        let mut bad = item(p1, 1, "");
        bad.product_id = "garbage".to_string();
        let items = vec![item(p1, 3, ""), bad];
        let err = adjust_for_status_change(
            &store,
            OrderStatus::Cancelled,
            OrderStatus::Delivered,
            &items,
        )
        .await
        .expect_err("second item fails");

        assert!(matches!(err, InventoryError::InvalidProductId { .. }));
        assert_eq!(store.product_quantity(p1), dec!(7));
    }

    /// Counters are not clamped at zero; overselling drives them negative.
    #[tokio::test]
    async fn test_decrement_below_zero_is_not_clamped() {
        let p1 = ProductId::new(Uuid::new_v4());
        let store = MemoryStore::default().with_product(product(p1, dec!(1)));

        let items = vec![item(p1, 3, "")];
        adjust_for_status_change(&store, OrderStatus::Active, OrderStatus::Shipped, &items)
            .await
            .expect("adjustment succeeds");

        assert_eq!(store.product_quantity(p1), dec!(-2));
    }
}
