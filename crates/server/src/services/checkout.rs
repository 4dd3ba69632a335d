//! Checkout coordinator.
//!
//! Converts the current cart into a durable order plus line items. The
//! conversion is transactional in intent but not in guarantee: the order and
//! each item are independent single-record writes against the persistence
//! boundary, performed sequentially in cart order. A failure mid-sequence
//! leaves the already-written records in place (no rollback) and keeps the
//! cart intact so the customer can retry the whole submission — which can
//! produce a duplicate order. Each attempt carries a fresh idempotency key
//! (`checkout_ref`) so the repository can refuse a re-execution of the same
//! attempt and duplicates stay attributable.

use std::sync::Arc;

use thiserror::Error;

use quitanda_core::{CheckoutAttemptId, Email, EmailError, OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{CartEntry, CustomerInfo, NewOrder, NewOrderItem, Order};
use crate::services::cart::{CartError, CartStore, cart_total};

/// Errors from `submit`.
///
/// The first three are validation failures: they are reported before any
/// write occurs and are recovered by re-prompting the customer.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no entries.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A mandatory customer field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The customer email does not parse.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The order record itself could not be created. Nothing was written.
    #[error("failed to create order: {0}")]
    OrderCreate(#[source] RepositoryError),

    /// The order was created but not all items were written.
    ///
    /// The order exists with `written` of `total` items; the cart was not
    /// cleared. Retrying submits a brand-new attempt.
    #[error("order {order_id} created but only {written} of {total} items were written: {source}")]
    PartialWrite {
        order_id: OrderId,
        written: usize,
        total: usize,
        #[source]
        source: RepositoryError,
    },

    /// The cart could not be read.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// The only entry point that creates orders and order items.
#[derive(Clone)]
pub struct CheckoutService {
    cart: CartStore,
    orders: Arc<dyn OrderRepository>,
}

impl CheckoutService {
    /// Create a coordinator over the cart store and order repository.
    #[must_use]
    pub fn new(cart: CartStore, orders: Arc<dyn OrderRepository>) -> Self {
        Self { cart, orders }
    }

    /// Submit the current cart as an order.
    ///
    /// Steps: validate (no writes on failure), create the order with status
    /// `pending` and the frozen cart total, create one item per cart entry
    /// sequentially, then clear the cart and return the order.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]. On `PartialWrite` the order exists with a
    /// partial item set and the cart is left untouched.
    pub async fn submit(&self, customer: &CustomerInfo) -> Result<Order, CheckoutError> {
        let entries = self.cart.load().await?;
        if entries.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let email = validate_customer(customer)?;

        let total_amount = cart_total(&entries);
        let attempt = CheckoutAttemptId::generate();
        tracing::info!(%attempt, items = entries.len(), %total_amount, "submitting checkout");

        let order = self
            .orders
            .create_order(NewOrder {
                checkout_ref: attempt,
                customer_name: customer.name.trim().to_owned(),
                customer_email: email,
                customer_phone: customer.phone.trim().to_owned(),
                delivery_address: customer.address.trim().to_owned(),
                notes: customer.notes.clone().filter(|n| !n.trim().is_empty()),
                total_amount,
                status: OrderStatus::Pending,
            })
            .await
            .map_err(CheckoutError::OrderCreate)?;

        for (written, entry) in entries.iter().enumerate() {
            self.orders
                .create_item(item_for(&order, entry))
                .await
                .map_err(|source| CheckoutError::PartialWrite {
                    order_id: order.id,
                    written,
                    total: entries.len(),
                    source,
                })?;
        }

        // The order is durable at this point; a failed local clear must not
        // fail the checkout.
        if let Err(e) = self.cart.clear().await {
            tracing::warn!(order_id = %order.id, "cart not cleared after checkout: {e}");
        }

        tracing::info!(order_id = %order.id, "checkout complete");
        Ok(order)
    }
}

/// Validate mandatory customer fields before any write.
fn validate_customer(customer: &CustomerInfo) -> Result<Email, CheckoutError> {
    if customer.name.trim().is_empty() {
        return Err(CheckoutError::MissingField("name"));
    }
    if customer.email.trim().is_empty() {
        return Err(CheckoutError::MissingField("email"));
    }
    if customer.phone.trim().is_empty() {
        return Err(CheckoutError::MissingField("phone"));
    }
    if customer.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    Ok(Email::parse(customer.email.trim())?)
}

/// Freeze a cart entry into an order item for `order`.
fn item_for(order: &Order, entry: &CartEntry) -> NewOrderItem {
    NewOrderItem {
        order_id: order.id,
        product_id: entry.product_id,
        product_name: entry.name.clone(),
        quantity: entry.quantity,
        unit_price: entry.unit_price,
        total_price: entry.line_total(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "João Pereira".to_owned(),
            email: "joao@example.com".to_owned(),
            phone: "(21) 98888-7777".to_owned(),
            address: "Av. Atlântica, 900".to_owned(),
            notes: Some("Portaria dos fundos".to_owned()),
        }
    }

    #[test]
    fn test_validate_rejects_each_missing_field() {
        let cases: [(&str, fn(&mut CustomerInfo)); 4] = [
            ("name", |c| c.name = "  ".to_owned()),
            ("email", |c| c.email = String::new()),
            ("phone", |c| c.phone = String::new()),
            ("address", |c| c.address = "\t".to_owned()),
        ];
        for (field, wreck) in cases {
            let mut c = customer();
            wreck(&mut c);
            match validate_customer(&c) {
                Err(CheckoutError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut c = customer();
        c.email = "not-an-email".to_owned();
        assert!(matches!(
            validate_customer(&c),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_accepts_complete_info() {
        let email = validate_customer(&customer()).unwrap();
        assert_eq!(email.as_str(), "joao@example.com");
    }
}
