//! Business logic on top of the repositories.
//!
//! - [`inventory`] - stock adjustment on order status transitions
//! - [`email`] - SMTP transactional sends
//! - [`reports`] - CSV builders for the monthly exports

pub mod email;
pub mod inventory;
pub mod reports;

pub use email::{EmailError, EmailService};
pub use inventory::{InventoryError, PgStockStore, StockStore};
