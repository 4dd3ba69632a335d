//! Admin routes.
//!
//! These handlers only resolve the caller's identity; the admin capability
//! check itself lives in the order directory, so an unauthorized caller gets
//! the same 403 regardless of which surface reached the directory.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use quitanda_core::{OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::models::{Order, OrderWithItems};
use crate::services::{OrderStats, StatusFilter};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// A status name, or the sentinel `all` (default).
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
}

/// `GET /admin/orders` - every order, optionally narrowed by status.
pub async fn list_orders(
    State(state): State<AppState>,
    Identity(user): Identity,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrderWithItems>>> {
    let filter = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map_err(|_| AppError::BadRequest(format!("unknown status: {raw}")))?,
    };

    let orders = state.directory().list_all(&user, filter).await?;
    Ok(Json(orders))
}

/// `PATCH /admin/orders/{id}/status` - move an order to a new status.
pub async fn update_status(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<Order>> {
    let order = state
        .directory()
        .update_status(&user, id, body.status)
        .await?;
    Ok(Json(order))
}

/// `GET /admin/stats` - derived statistics over the full order collection.
///
/// Recomputed on every call; nothing is cached.
pub async fn stats(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> Result<Json<OrderStats>> {
    let orders = state.directory().list_all_orders(&user).await?;
    Ok(Json(OrderStats::compute(&orders)))
}
