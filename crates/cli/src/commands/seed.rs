//! Write a starter product catalog.
//!
//! The server treats the catalog file as read-only input; this command
//! produces one with a handful of grocery staples so a fresh checkout can be
//! exercised end to end without hand-writing JSON.

use std::path::Path;

use tracing::info;

use quitanda_core::{Money, ProductId};
use quitanda_server::models::Product;

/// Write the starter catalog to `path`.
///
/// # Errors
///
/// Returns an error if the file already exists (without `force`), or if the
/// directory cannot be created or the file cannot be written.
pub fn catalog(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let products = starter_products();
    let raw = serde_json::to_string_pretty(&products)?;
    std::fs::write(path, raw)?;

    info!(path = %path.display(), count = products.len(), "catalog written");
    Ok(())
}

fn starter_products() -> Vec<Product> {
    [
        ("Arroz branco 5kg", "alimentos", 2490, "un"),
        ("Feijão carioca 1kg", "alimentos", 899, "un"),
        ("Café torrado e moído 500g", "alimentos", 1890, "un"),
        ("Leite integral 1L", "laticínios", 579, "un"),
        ("Queijo minas frescal", "laticínios", 3200, "kg"),
        ("Banana prata", "hortifruti", 450, "kg"),
        ("Tomate italiano", "hortifruti", 800, "kg"),
        ("Água mineral 1,5L", "bebidas", 250, "un"),
        ("Suco de laranja integral 1L", "bebidas", 1290, "un"),
        ("Sabão em pó 800g", "limpeza", 1200, "un"),
    ]
    .into_iter()
    .map(|(name, category, cents, unit)| Product {
        id: ProductId::generate(),
        name: name.to_owned(),
        description: None,
        category: category.to_owned(),
        price: Money::from_cents(cents),
        unit: unit.to_owned(),
        stock: 50,
        image_url: None,
        active: true,
    })
    .collect()
}
