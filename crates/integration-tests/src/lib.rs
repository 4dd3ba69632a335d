//! Integration test support for Quitanda.
//!
//! Wires the real services over in-memory collaborators so tests exercise
//! the full cart-to-order pipeline without a running HTTP server.
//!
//! # Test Categories
//!
//! - `cart_store` - persisted cart behaviour across surfaces
//! - `checkout_flow` - cart-to-order conversion, including partial failure
//! - `order_lifecycle` - status transitions, scoping, and statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use quitanda_core::{Email, Money, OrderId, OrderStatus, ProductId, Role};
use quitanda_server::db::{
    InMemoryKvStore, InMemoryOrderRepository, OrderFilter, OrderRepository, RepositoryError,
};
use quitanda_server::models::{CurrentUser, CustomerInfo, NewOrder, NewOrderItem, Order, OrderItem, Product};
use quitanda_server::services::{CartStore, CheckoutService, OrderDirectory};

/// The full pipeline over in-memory collaborators.
pub struct TestContext {
    pub repo: Arc<InMemoryOrderRepository>,
    pub cart: CartStore,
    pub checkout: CheckoutService,
    pub directory: OrderDirectory,
}

impl TestContext {
    /// A pipeline whose order writes always succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::over(Arc::new(InMemoryOrderRepository::new()))
    }

    /// A pipeline whose order-item writes start failing after
    /// `failures_after` successful item writes.
    #[must_use]
    pub fn with_flaky_items(failures_after: usize) -> (Self, Arc<InMemoryOrderRepository>) {
        let inner = Arc::new(InMemoryOrderRepository::new());
        let flaky = Arc::new(FlakyOrderRepository::new(Arc::clone(&inner), failures_after));

        let cart = CartStore::new(Arc::new(InMemoryKvStore::new()));
        let checkout = CheckoutService::new(cart.clone(), Arc::clone(&flaky) as Arc<dyn OrderRepository>);
        let directory = OrderDirectory::new(flaky);

        (
            Self {
                repo: Arc::clone(&inner),
                cart,
                checkout,
                directory,
            },
            inner,
        )
    }

    /// A pipeline with a fresh cart over an existing repository, as a second
    /// customer session would see it.
    #[must_use]
    pub fn with_repo(repo: Arc<InMemoryOrderRepository>) -> Self {
        Self::over(repo)
    }

    fn over(repo: Arc<InMemoryOrderRepository>) -> Self {
        let cart = CartStore::new(Arc::new(InMemoryKvStore::new()));
        let orders: Arc<dyn OrderRepository> = Arc::clone(&repo) as Arc<dyn OrderRepository>;
        let checkout = CheckoutService::new(cart.clone(), Arc::clone(&orders));
        let directory = OrderDirectory::new(orders);

        Self {
            repo,
            cart,
            checkout,
            directory,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository wrapper whose `create_item` fails after a set number of
/// successful item writes. Everything else delegates untouched, so the
/// partially written records stay observable through the inner repository.
pub struct FlakyOrderRepository {
    inner: Arc<InMemoryOrderRepository>,
    items_written: AtomicUsize,
    failures_after: usize,
}

impl FlakyOrderRepository {
    #[must_use]
    pub fn new(inner: Arc<InMemoryOrderRepository>, failures_after: usize) -> Self {
        Self {
            inner,
            items_written: AtomicUsize::new(0),
            failures_after,
        }
    }
}

#[async_trait]
impl OrderRepository for FlakyOrderRepository {
    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        self.inner.create_order(new).await
    }

    async fn create_item(&self, new: NewOrderItem) -> Result<OrderItem, RepositoryError> {
        let written = self.items_written.fetch_add(1, Ordering::SeqCst);
        if written >= self.failures_after {
            return Err(RepositoryError::Storage("item write refused".to_owned()));
        }
        self.inner.create_item(new).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        self.inner.update_status(id, status).await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.inner.get_order(id).await
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        self.inner.list_orders(filter).await
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        self.inner.items_for(order_id).await
    }
}

/// A complete, valid delivery form.
#[must_use]
pub fn customer(email: &str) -> CustomerInfo {
    CustomerInfo {
        name: "Maria Souza".to_owned(),
        email: email.to_owned(),
        phone: "(11) 99999-0000".to_owned(),
        address: "Rua das Laranjeiras, 52".to_owned(),
        notes: None,
    }
}

/// An active product priced in whole cents.
#[must_use]
pub fn product(name: &str, cents: i64) -> Product {
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

/// An admin viewer for directory calls.
///
/// # Panics
///
/// Panics if the fixed email fails to parse, which it does not.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn admin() -> CurrentUser {
    CurrentUser {
        email: Email::parse("gerente@example.com").unwrap(),
        full_name: "Gerente".to_owned(),
        role: Role::Admin,
    }
}

/// A non-admin viewer for directory calls.
///
/// # Panics
///
/// Panics if the fixed email fails to parse, which it does not.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn viewer(email: &str) -> CurrentUser {
    CurrentUser {
        email: Email::parse(email).unwrap(),
        full_name: "Cliente".to_owned(),
        role: Role::Customer,
    }
}
