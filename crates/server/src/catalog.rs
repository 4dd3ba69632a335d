//! Catalog gateway.
//!
//! Read-only access to product records. Products are maintained elsewhere
//! and arrive already validated; this boundary only lists and fetches them,
//! and never surfaces inactive products.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use quitanda_core::ProductId;

use crate::models::Product;

/// Errors from the catalog boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog source could not be read.
    #[error("catalog i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Filter for catalog listings. Fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Only products in this category.
    pub category: Option<String>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
}

/// Sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Alphabetical by product name.
    #[default]
    Name,
    /// Cheapest first.
    Price,
}

/// Read-only product listing boundary.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// List active products matching `filter`, sorted by `sort`.
    async fn list(&self, filter: &CatalogFilter, sort: SortKey)
    -> Result<Vec<Product>, CatalogError>;

    /// Fetch a single product by id. Inactive products resolve to `None`.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;
}

/// Catalog held in memory, loaded once at startup.
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Create a catalog over a fixed product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON file (an array of products).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Ok(Self::new(products))
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn list(
        &self,
        filter: &CatalogFilter,
        sort: SortKey,
    ) -> Result<Vec<Product>, CatalogError> {
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.active)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| p.category == category)
            })
            .filter(|p| {
                needle.as_deref().is_none_or(|needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect();

        match sort {
            SortKey::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Price => products.sort_by(|a, b| a.price.cmp(&b.price)),
        }

        Ok(products)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .find(|p| p.id == id && p.active)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quitanda_core::Money;

    fn product(name: &str, category: &str, cents: i64, active: bool) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            description: None,
            category: category.to_owned(),
            price: Money::from_cents(cents),
            unit: "un".to_owned(),
            stock: 10,
            image_url: None,
            active,
        }
    }

    fn sample_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            product("Café torrado", "alimentos", 1890, true),
            product("Água mineral", "bebidas", 250, true),
            product("Sabão em pó", "limpeza", 1200, false),
        ])
    }

    #[tokio::test]
    async fn test_inactive_products_are_hidden() {
        let catalog = sample_catalog();
        let listed = catalog
            .list(&CatalogFilter::default(), SortKey::Name)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.active));

        let inactive_id = catalog
            .products
            .iter()
            .find(|p| !p.active)
            .map(|p| p.id)
            .unwrap();
        assert!(catalog.get(inactive_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_category_and_search_filters() {
        let catalog = sample_catalog();

        let bebidas = catalog
            .list(
                &CatalogFilter {
                    category: Some("bebidas".to_owned()),
                    search: None,
                },
                SortKey::Name,
            )
            .await
            .unwrap();
        assert_eq!(bebidas.len(), 1);

        let hits = catalog
            .list(
                &CatalogFilter {
                    category: None,
                    search: Some("CAFÉ".to_owned()),
                },
                SortKey::Name,
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().name, "Café torrado");
    }

    #[tokio::test]
    async fn test_sort_by_price() {
        let catalog = sample_catalog();
        let listed = catalog
            .list(&CatalogFilter::default(), SortKey::Price)
            .await
            .unwrap();
        assert_eq!(listed.first().unwrap().name, "Água mineral");
    }
}
