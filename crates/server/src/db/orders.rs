//! Order / order-item repository.
//!
//! The remote store behind this trait persists one record per call; there is
//! no batch write and no transaction spanning an order and its items. The
//! checkout coordinator leans on exactly that contract (see
//! `services::checkout` for the partial-failure behaviour).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quitanda_core::{Email, OrderId, OrderItemId, OrderStatus};

use super::RepositoryError;
use crate::models::{NewOrder, NewOrderItem, Order, OrderItem};

/// Filter for order listings. Fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders belonging to this customer email.
    pub customer_email: Option<Email>,
    /// Only orders currently in this status.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Match everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match a single customer's orders.
    #[must_use]
    pub fn for_customer(email: Email) -> Self {
        Self {
            customer_email: Some(email),
            status: None,
        }
    }

    /// Match orders in a single status.
    #[must_use]
    pub fn with_status(status: OrderStatus) -> Self {
        Self {
            customer_email: None,
            status: Some(status),
        }
    }

    fn matches(&self, order: &Order) -> bool {
        if let Some(email) = &self.customer_email
            && order.customer_email != *email
        {
            return false;
        }
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        true
    }
}

/// Persistence boundary for orders and their line items.
///
/// Each call fully succeeds or fails for that single record; implementations
/// assign `id` (and `created_at` for orders) on creation.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order with the same
    /// `checkout_ref` already exists.
    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError>;

    /// Create one order line item.
    async fn create_item(&self, new: NewOrderItem) -> Result<OrderItem, RepositoryError>;

    /// Overwrite the status of an existing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;

    /// Fetch a single order.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// List orders matching `filter`, newest first by `created_at`.
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError>;

    /// List the items belonging to an order, in creation order.
    ///
    /// An order with no persisted items yields an empty list, not an error.
    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError>;
}

/// In-memory repository.
///
/// The collections tolerate concurrent creates from independent sessions
/// without coordination; no cross-order invariant needs locking beyond the
/// per-collection `RwLock`.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
    items: Arc<RwLock<Vec<OrderItem>>>,
}

impl InMemoryOrderRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted orders. Test observability helper.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Number of persisted items across all orders. Test observability helper.
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;

        if orders.iter().any(|o| o.checkout_ref == new.checkout_ref) {
            return Err(RepositoryError::Conflict(format!(
                "checkout attempt {} already created an order",
                new.checkout_ref
            )));
        }

        let order = Order {
            id: OrderId::generate(),
            checkout_ref: new.checkout_ref,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            customer_phone: new.customer_phone,
            delivery_address: new.delivery_address,
            notes: new.notes,
            total_amount: new.total_amount,
            status: new.status,
            created_at: Utc::now(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn create_item(&self, new: NewOrderItem) -> Result<OrderItem, RepositoryError> {
        let item = OrderItem {
            id: OrderItemId::generate(),
            order_id: new.order_id,
            product_id: new.product_id,
            product_name: new.product_name,
            quantity: new.quantity,
            unit_price: new.unit_price,
            total_price: new.total_price,
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepositoryError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders.iter().filter(|o| filter.matches(o)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quitanda_core::{CheckoutAttemptId, Money, ProductId};

    fn sample_order(email: &str) -> NewOrder {
        NewOrder {
            checkout_ref: CheckoutAttemptId::generate(),
            customer_name: "Maria Souza".to_owned(),
            customer_email: Email::parse(email).unwrap(),
            customer_phone: "(11) 99999-0000".to_owned(),
            delivery_address: "Rua das Laranjeiras, 52".to_owned(),
            notes: None,
            total_amount: Money::from_cents(3500),
            status: OrderStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create_order(sample_order("a@b.com")).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(repo.get_order(order.id).await.unwrap().unwrap().id, order.id);
    }

    #[tokio::test]
    async fn test_duplicate_checkout_ref_is_rejected() {
        let repo = InMemoryOrderRepository::new();
        let mut new = sample_order("a@b.com");
        let attempt = CheckoutAttemptId::generate();
        new.checkout_ref = attempt;
        repo.create_order(new.clone()).await.unwrap();

        let err = repo.create_order(new).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_status_missing_order() {
        let repo = InMemoryOrderRepository::new();
        let err = repo
            .update_status(OrderId::generate(), OrderStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_filters_by_email_and_status() {
        let repo = InMemoryOrderRepository::new();
        let a = repo.create_order(sample_order("a@b.com")).await.unwrap();
        let b = repo.create_order(sample_order("c@d.com")).await.unwrap();
        repo.update_status(b.id, OrderStatus::Delivered).await.unwrap();

        let mine = repo
            .list_orders(&OrderFilter::for_customer(Email::parse("a@b.com").unwrap()))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().unwrap().id, a.id);

        let delivered = repo
            .list_orders(&OrderFilter::with_status(OrderStatus::Delivered))
            .await
            .unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered.first().unwrap().id, b.id);
    }

    #[tokio::test]
    async fn test_items_join_and_empty_join() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create_order(sample_order("a@b.com")).await.unwrap();

        assert!(repo.items_for(order.id).await.unwrap().is_empty());

        repo.create_item(NewOrderItem {
            order_id: order.id,
            product_id: ProductId::generate(),
            product_name: "Feijão carioca".to_owned(),
            quantity: 2,
            unit_price: Money::from_cents(899),
            total_price: Money::from_cents(1798),
        })
        .await
        .unwrap();

        let items = repo.items_for(order.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().total_price, Money::from_cents(1798));
    }
}
