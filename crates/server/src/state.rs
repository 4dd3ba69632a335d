//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogGateway;
use crate::config::ServerConfig;
use crate::db::OrderRepository;
use crate::identity::IdentityProvider;
use crate::services::{CartStore, CheckoutService, OrderDirectory};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the collaborator
/// boundaries, and the services built over them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Arc<dyn CatalogGateway>,
    identity: Arc<dyn IdentityProvider>,
    cart: CartStore,
    checkout: CheckoutService,
    directory: OrderDirectory,
}

impl AppState {
    /// Assemble the application state from its collaborator boundaries.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        catalog: Arc<dyn CatalogGateway>,
        identity: Arc<dyn IdentityProvider>,
        orders: Arc<dyn OrderRepository>,
        cart: CartStore,
    ) -> Self {
        let checkout = CheckoutService::new(cart.clone(), Arc::clone(&orders));
        let directory = OrderDirectory::new(orders);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                identity,
                cart,
                checkout,
                directory,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Catalog gateway.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogGateway {
        self.inner.catalog.as_ref()
    }

    /// Identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// The checkout coordinator.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    /// The order directory.
    #[must_use]
    pub fn directory(&self) -> &OrderDirectory {
        &self.inner.directory
    }
}
