//! Catalog product record.

use serde::{Deserialize, Serialize};

use quitanda_core::{Money, ProductId};

/// A product as served by the catalog gateway.
///
/// Products arrive already validated; the order pipeline only reads them.
/// Only `active` products are ever surfaced to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub price: Money,
    /// Sale unit shown next to the price (e.g. "kg", "un", "cx").
    pub unit: String,
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    pub active: bool,
}
