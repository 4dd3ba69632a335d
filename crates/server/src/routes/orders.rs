//! Customer order routes.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::Identity;
use crate::models::OrderWithItems;
use crate::state::AppState;

/// `GET /orders` - the authenticated customer's orders, newest first.
///
/// Scoped by the authenticated email; there is no way to request another
/// customer's orders through this route.
pub async fn list_mine(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = state.directory().list_for_customer(&user.email).await?;
    Ok(Json(orders))
}
