//! Cart store.
//!
//! Single source of truth for pre-checkout cart contents. The cart lives as
//! a serialized snapshot in a key-value store under a fixed key so that
//! independent surfaces (catalog page, cart page, header badge) share it
//! without a shared in-memory process. Every mutation persists the full
//! snapshot immediately and then broadcasts a payload-free change
//! notification; subscribers must re-read the store rather than trust
//! anything cached.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use quitanda_core::{Money, ProductId};

use crate::db::{KvError, KvStore};
use crate::models::{CartEntry, Product};

/// Fixed key the cart snapshot is persisted under.
pub const CART_KEY: &str = "cart";

/// Errors from cart persistence.
#[derive(Debug, Error)]
pub enum CartError {
    /// The key-value store failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] KvError),

    /// The snapshot could not be serialized.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The client-local cart over a key-value store.
///
/// Cheap to clone; clones share the same store and notification channel.
#[derive(Clone)]
pub struct CartStore {
    kv: Arc<dyn KvStore>,
    changed: broadcast::Sender<()>,
}

impl CartStore {
    /// Create a cart store over `kv`.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        let (changed, _) = broadcast::channel(16);
        Self { kv, changed }
    }

    /// Subscribe to cart-changed notifications.
    ///
    /// Notifications carry no payload; re-read the store on receipt.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Load the current cart.
    ///
    /// An absent snapshot is an empty cart. A malformed snapshot is also
    /// treated as empty (logged, never an error): there is no schema
    /// migration for the local store.
    pub async fn load(&self) -> Result<Vec<CartEntry>, CartError> {
        let Some(raw) = self.kv.get(CART_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<CartEntry>>(&raw) {
            Ok(entries) => Ok(normalize(entries)),
            Err(e) => {
                tracing::warn!("discarding malformed cart snapshot: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// Merges into an existing entry by product id; otherwise appends a new
    /// entry capturing the product's display fields as of now. Returns the
    /// resulting cart.
    pub async fn add(&self, product: &Product, quantity: u32) -> Result<Vec<CartEntry>, CartError> {
        let mut entries = self.load().await?;

        if let Some(entry) = entries.iter_mut().find(|e| e.product_id == product.id) {
            entry.quantity += quantity;
        } else {
            entries.push(CartEntry::from_product(product, quantity));
        }

        let entries = normalize(entries);
        self.persist(&entries).await?;
        Ok(entries)
    }

    /// Set the quantity of an entry. Zero removes the entry.
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Vec<CartEntry>, CartError> {
        let mut entries = self.load().await?;

        if quantity == 0 {
            entries.retain(|e| e.product_id != product_id);
        } else if let Some(entry) = entries.iter_mut().find(|e| e.product_id == product_id) {
            entry.quantity = quantity;
        }

        let entries = normalize(entries);
        self.persist(&entries).await?;
        Ok(entries)
    }

    /// Remove an entry. Idempotent when absent.
    pub async fn remove(&self, product_id: ProductId) -> Result<Vec<CartEntry>, CartError> {
        let mut entries = self.load().await?;
        entries.retain(|e| e.product_id != product_id);
        self.persist(&entries).await?;
        Ok(entries)
    }

    /// Empty the cart. Called only after a fully successful checkout.
    pub async fn clear(&self) -> Result<(), CartError> {
        self.kv.delete(CART_KEY).await?;
        self.notify();
        Ok(())
    }

    /// Sum of `unit_price * quantity` over the cart; zero when empty.
    pub async fn total(&self) -> Result<Money, CartError> {
        Ok(cart_total(&self.load().await?))
    }

    /// Persist the full snapshot, then notify subscribers.
    async fn persist(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        let raw = serde_json::to_string(entries)?;
        self.kv.put(CART_KEY, raw).await?;
        self.notify();
        Ok(())
    }

    /// Fire-and-forget change notification. No subscribers is fine.
    fn notify(&self) {
        let _ = self.changed.send(());
    }
}

/// Enforce the cart invariant: no entry with quantity below one.
fn normalize(mut entries: Vec<CartEntry>) -> Vec<CartEntry> {
    entries.retain(|e| e.quantity >= 1);
    entries
}

/// Pure cart total over a slice of entries.
#[must_use]
pub fn cart_total(entries: &[CartEntry]) -> Money {
    entries.iter().map(CartEntry::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::InMemoryKvStore;
    use quitanda_core::ProductId;

    fn product(name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            description: None,
            category: "alimentos".to_owned(),
            price: Money::from_cents(cents),
            unit: "un".to_owned(),
            stock: 50,
            image_url: None,
            active: true,
        }
    }

    fn store() -> CartStore {
        CartStore::new(Arc::new(InMemoryKvStore::new()))
    }

    #[tokio::test]
    async fn test_add_merges_by_product_id() {
        let cart = store();
        let p = product("Leite integral", 579);

        cart.add(&p, 2).await.unwrap();
        let entries = cart.add(&p, 3).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_captured_price_does_not_follow_catalog() {
        let cart = store();
        let mut p = product("Tomate", 800);
        cart.add(&p, 1).await.unwrap();

        // catalog price changes after the entry was captured
        p.price = Money::from_cents(1200);
        let entries = cart.add(&p, 1).await.unwrap();

        assert_eq!(entries.first().unwrap().unit_price, Money::from_cents(800));
        assert_eq!(cart.total().await.unwrap(), Money::from_cents(1600));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes() {
        let cart = store();
        let p = product("Banana prata", 450);
        cart.add(&p, 2).await.unwrap();

        let entries = cart.set_quantity(p.id, 0).await.unwrap();
        assert!(entries.is_empty());
        assert!(cart.total().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let cart = store();
        let entries = cart.remove(ProductId::generate()).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_empty() {
        let kv = Arc::new(InMemoryKvStore::new());
        kv.put(CART_KEY, "not json at all".to_owned()).await.unwrap();

        let cart = CartStore::new(kv);
        assert!(cart.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_notifies_subscribers() {
        let cart = store();
        let mut rx = cart.subscribe();

        cart.add(&product("Ovos", 1299), 1).await.unwrap();
        rx.recv().await.unwrap();

        cart.clear().await.unwrap();
        rx.recv().await.unwrap();
    }

    #[tokio::test]
    async fn test_snapshot_shared_across_surfaces() {
        let kv: Arc<dyn KvStore> = Arc::new(InMemoryKvStore::new());
        let catalog_page = CartStore::new(Arc::clone(&kv));
        let header_badge = CartStore::new(kv);

        catalog_page.add(&product("Queijo minas", 3200), 2).await.unwrap();

        let seen = header_badge.load().await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen.first().unwrap().quantity, 2);
    }
}
