//! Product catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use quitanda_core::ProductId;

use crate::catalog::{CatalogFilter, SortKey};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    /// Case-insensitive search over name and description.
    pub q: Option<String>,
    /// `name` (default) or `price`.
    pub sort: Option<String>,
}

/// `GET /products` - active products, filtered and sorted.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let sort = match query.sort.as_deref() {
        None | Some("name") => SortKey::Name,
        Some("price") => SortKey::Price,
        Some(other) => {
            return Err(AppError::BadRequest(format!("unknown sort key: {other}")));
        }
    };

    let filter = CatalogFilter {
        category: query.category,
        search: query.q,
    };

    let products = state.catalog().list(&filter, sort).await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - one active product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
