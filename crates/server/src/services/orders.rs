//! Order directory: the read side of the order pipeline, plus the
//! admin-gated status mutation.
//!
//! Authorization is a capability check performed once at this boundary,
//! returning an explicit error rather than relying on ambient user state
//! scattered through the call sites.

use std::sync::Arc;

use thiserror::Error;

use quitanda_core::{Email, OrderId, OrderStatus};

use crate::db::{OrderFilter, OrderRepository, RepositoryError};
use crate::models::{CurrentUser, Order, OrderWithItems};

/// Errors from the order directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The caller lacks the admin capability.
    #[error("access denied: administrator role required")]
    AccessDenied,

    /// The order does not exist.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The order is in a terminal status and may not be moved.
    #[error("order is {from} which is terminal; cannot move to {requested}")]
    TerminalStatus {
        from: OrderStatus,
        requested: OrderStatus,
    },

    /// The persistence boundary failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Status narrowing for admin listings.
///
/// `All` is the sentinel carrying no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every order regardless of status.
    #[default]
    All,
    /// Only orders currently in the given status.
    Only(OrderStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse::<OrderStatus>().map(Self::Only)
        }
    }
}

impl From<StatusFilter> for OrderFilter {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => Self::all(),
            StatusFilter::Only(status) => Self::with_status(status),
        }
    }
}

/// Read-side join of orders with their items, scoped per caller.
#[derive(Clone)]
pub struct OrderDirectory {
    repo: Arc<dyn OrderRepository>,
}

impl OrderDirectory {
    /// Create a directory over the order repository.
    #[must_use]
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Every order belonging to `email`, newest first, with items joined.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Repository` if a fetch fails.
    pub async fn list_for_customer(
        &self,
        email: &Email,
    ) -> Result<Vec<OrderWithItems>, DirectoryError> {
        let orders = self
            .repo
            .list_orders(&OrderFilter::for_customer(email.clone()))
            .await?;
        self.join_items(orders).await
    }

    /// Every order in the system, newest first, optionally narrowed by
    /// status. Admin capability required.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::AccessDenied` for non-admin viewers.
    pub async fn list_all(
        &self,
        viewer: &CurrentUser,
        filter: StatusFilter,
    ) -> Result<Vec<OrderWithItems>, DirectoryError> {
        require_admin(viewer)?;
        let orders = self.repo.list_orders(&filter.into()).await?;
        self.join_items(orders).await
    }

    /// Every order without item joins, for statistics. Admin capability
    /// required.
    pub async fn list_all_orders(
        &self,
        viewer: &CurrentUser,
    ) -> Result<Vec<Order>, DirectoryError> {
        require_admin(viewer)?;
        Ok(self.repo.list_orders(&OrderFilter::all()).await?)
    }

    /// Move an order to `new_status`. Admin capability required.
    ///
    /// Ordering between non-terminal states is deliberately not enforced;
    /// leaving a terminal state is rejected. On persistence failure the
    /// stored status is unchanged.
    ///
    /// # Errors
    ///
    /// `AccessDenied`, `OrderNotFound`, `TerminalStatus`, or `Repository`.
    pub async fn update_status(
        &self,
        viewer: &CurrentUser,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, DirectoryError> {
        require_admin(viewer)?;

        let order = self
            .repo
            .get_order(order_id)
            .await?
            .ok_or(DirectoryError::OrderNotFound(order_id))?;

        if !order.status.can_transition_to(new_status) {
            return Err(DirectoryError::TerminalStatus {
                from: order.status,
                requested: new_status,
            });
        }

        tracing::info!(%order_id, from = %order.status, to = %new_status, "order status updated");
        Ok(self.repo.update_status(order_id, new_status).await?)
    }

    /// Join items onto each order. Sequential per-order fetches: each order
    /// is independent and an empty item set is a legitimate result.
    async fn join_items(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderWithItems>, DirectoryError> {
        let mut joined = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.repo.items_for(order.id).await?;
            joined.push(OrderWithItems { order, items });
        }
        Ok(joined)
    }
}

/// The capability check gating admin-only operations.
const fn require_admin(viewer: &CurrentUser) -> Result<(), DirectoryError> {
    if viewer.is_admin() {
        Ok(())
    } else {
        Err(DirectoryError::AccessDenied)
    }
}
