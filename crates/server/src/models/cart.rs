//! Cart line entry.

use serde::{Deserialize, Serialize};

use quitanda_core::{Money, ProductId};

use super::Product;

/// One line of the pre-checkout cart.
///
/// Display fields (`name`, `unit_price`, `unit`, `image_url`) are captured
/// from the product at the moment it is added and never refreshed, so a
/// later catalog price change does not retroactively reprice the cart.
///
/// Invariant: `quantity >= 1`. An entry that would drop to zero is removed
/// from the cart instead of being stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub unit: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartEntry {
    /// Capture a product into a new cart entry.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            unit: product.unit.clone(),
            image_url: product.image_url.clone(),
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let entry = CartEntry {
            product_id: ProductId::generate(),
            name: "Arroz 5kg".to_owned(),
            unit_price: Money::from_cents(2490),
            unit: "un".to_owned(),
            image_url: None,
            quantity: 3,
        };
        assert_eq!(entry.line_total(), Money::from_cents(7470));
    }
}
