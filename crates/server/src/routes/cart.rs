//! Cart routes.
//!
//! Every mutation responds with the resulting cart view so clients can
//! re-render without a follow-up fetch; the change notification still fires
//! for any other surface watching the store.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use quitanda_core::{Money, ProductId};

use crate::error::{AppError, Result};
use crate::models::CartEntry;
use crate::services::cart_total;
use crate::state::AppState;

/// Cart contents plus the derived figures every surface needs.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub entries: Vec<CartEntry>,
    pub total: Money,
    /// Sum of quantities, for the header badge.
    pub count: u32,
}

impl CartView {
    fn from_entries(entries: Vec<CartEntry>) -> Self {
        let total = cart_total(&entries);
        let count = entries.iter().map(|e| e.quantity).sum();
        Self {
            entries,
            total,
            count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemBody {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityBody {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// `GET /cart` - current cart contents.
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let entries = state.cart().load().await?;
    Ok(Json(CartView::from_entries(entries)))
}

/// `GET /cart/count` - just the badge count.
pub async fn count(State(state): State<AppState>) -> Result<Json<u32>> {
    let entries = state.cart().load().await?;
    Ok(Json(entries.iter().map(|e| e.quantity).sum()))
}

/// `POST /cart/items` - add a product to the cart.
///
/// The product must exist and be active in the catalog; its display fields
/// are captured into the entry at this moment.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddItemBody>,
) -> Result<Json<CartView>> {
    if body.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let product = state
        .catalog()
        .get(body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let entries = state.cart().add(&product, body.quantity).await?;
    Ok(Json(CartView::from_entries(entries)))
}

/// `PUT /cart/items` - set an entry's quantity. Zero removes it.
pub async fn set_quantity(
    State(state): State<AppState>,
    Json(body): Json<SetQuantityBody>,
) -> Result<Json<CartView>> {
    let entries = state
        .cart()
        .set_quantity(body.product_id, body.quantity)
        .await?;
    Ok(Json(CartView::from_entries(entries)))
}

/// `DELETE /cart/items/{product_id}` - remove an entry. Idempotent.
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let entries = state.cart().remove(product_id).await?;
    Ok(Json(CartView::from_entries(entries)))
}
