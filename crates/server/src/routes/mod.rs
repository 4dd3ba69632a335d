//! HTTP route handlers.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

/// Assemble the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::show))
        .route("/cart", get(cart::show))
        .route("/cart/count", get(cart::count))
        .route("/cart/items", post(cart::add).put(cart::set_quantity))
        .route("/cart/items/{product_id}", axum::routing::delete(cart::remove))
        .route("/checkout", post(checkout::submit))
        .route("/checkout/profile", get(checkout::profile))
        .route("/orders", get(orders::list_mine))
        .route("/admin/orders", get(admin::list_orders))
        .route("/admin/orders/{id}/status", patch(admin::update_status))
        .route("/admin/stats", get(admin::stats))
}
