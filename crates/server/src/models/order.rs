//! Order and order-item records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quitanda_core::{CheckoutAttemptId, Email, Money, OrderId, OrderItemId, OrderStatus, ProductId};

/// Delivery details collected at checkout.
///
/// `name`, `email`, `phone` and `address` are mandatory; the checkout
/// coordinator rejects the submission before any write if one is missing.
/// Pre-seeded from the authenticated user's profile when available, but the
/// customer may edit every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A submitted order.
///
/// Created exactly once, by the checkout coordinator; after creation only
/// `status` ever changes. `total_amount` is a frozen snapshot of the cart
/// total at checkout time and is never recomputed. Orders are never deleted:
/// cancellation is a status, not a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Idempotency key of the checkout attempt that created this order.
    pub checkout_ref: CheckoutAttemptId,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: String,
    pub delivery_address: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// One frozen line of an order.
///
/// `total_price = unit_price * quantity`, computed at creation. Tied to its
/// parent order by `order_id`; under a partial checkout failure an order can
/// legitimately end up with fewer items than the cart had.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

/// Read-side join of an order with its items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order fields supplied to the persistence boundary, which assigns `id`
/// and `created_at`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub checkout_ref: CheckoutAttemptId,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub total_amount: Money,
    pub status: OrderStatus,
}

/// Order-item fields supplied to the persistence boundary.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}
