//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! # Products
//! POST /admin/products                  - Create product
//! GET  /admin/products?sort=&search=    - Product listing
//! GET  /admin/products/{id}             - Product detail
//! PUT  /admin/products/{id}             - Patch product
//! PUT  /admin/products/{id}/quantity    - Set stock counters
//! PUT  /admin/products/{id}/status      - Set catalog status
//!
//! # Freebies
//! POST /admin/freebies                  - Create freebie
//! GET  /admin/freebies?sort=&search=    - Freebie listing
//! GET  /admin/freebies/dropdown         - Active freebies (id + name)
//! GET  /admin/freebies/{id}             - Freebie detail
//! PUT  /admin/freebies/{id}             - Patch freebie
//! PUT  /admin/freebies/{id}/quantity    - Set stock counters
//! PUT  /admin/freebies/{id}/status      - Set catalog status
//!
//! # Orders
//! POST /admin/orders                    - Create order
//! GET  /admin/orders?status=&sort=&search= - Order listing (two-month window)
//! PUT  /admin/orders/{id}               - Patch order (runs stock adjustment)
//! PUT  /admin/orders/{id}/status        - Set status only (no stock adjustment)
//! GET  /admin/orders/revenue            - Daily revenue, current + previous month
//! GET  /admin/orders/totals?status=     - Daily order counts
//! GET  /admin/orders/best-selling?status= - Best-selling products
//!
//! # Reviews
//! POST /admin/reviews                   - Create review
//! GET  /admin/reviews?sort=&search=     - Review listing
//! GET  /admin/reviews/product/{id}      - Reviews for one product
//! PUT  /admin/reviews/{id}              - Patch review
//! PUT  /admin/reviews/{id}/status       - Moderate review
//!
//! # Home images
//! POST   /admin/home-images             - Create image set
//! GET    /admin/home-images             - List image sets
//! PUT    /admin/home-images/{id}        - Replace images (empty list deletes)
//! DELETE /admin/home-images/{id}        - Delete image set
//!
//! # Email + reports
//! POST /send-email                      - Send an HTML email
//! GET  /reports/revenue                 - Revenue CSV
//! GET  /reports/total-orders            - Orders-per-day CSV
//! GET  /reports/best-selling            - Best sellers CSV
//! GET  /reports/total-expenses          - Intake expenses CSV
//! ```

use axum::{Router, routing::post};

use crate::state::AppState;

pub mod email;
pub mod freebies;
pub mod home_images;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;

/// Build the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/products", products::routes())
        .nest("/admin/freebies", freebies::routes())
        .nest("/admin/orders", orders::routes())
        .nest("/admin/reviews", reviews::routes())
        .nest("/admin/home-images", home_images::routes())
        .nest("/reports", reports::routes())
        .route("/send-email", post(email::send))
}
