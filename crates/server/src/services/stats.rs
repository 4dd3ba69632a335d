//! Derived order statistics.
//!
//! A pure function over the current order collection, recomputed on demand
//! whenever the underlying collection changes. Nothing here is cached or
//! stored.

use serde::Serialize;

use quitanda_core::{Money, OrderStatus};

use crate::models::Order;

/// Aggregate view over a set of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    /// Every order, regardless of status.
    pub total: usize,
    /// Orders still moving through the pipeline (non-terminal).
    pub open: usize,
    /// Orders delivered to the customer.
    pub delivered: usize,
    /// Orders cancelled by the store.
    pub cancelled: usize,
    /// Revenue: sum of `total_amount` over delivered orders only.
    pub revenue: Money,
}

impl OrderStats {
    /// Compute statistics for `orders`.
    #[must_use]
    pub fn compute(orders: &[Order]) -> Self {
        let mut stats = Self {
            total: orders.len(),
            open: 0,
            delivered: 0,
            cancelled: 0,
            revenue: Money::ZERO,
        };

        for order in orders {
            match order.status {
                OrderStatus::Delivered => {
                    stats.delivered += 1;
                    stats.revenue += order.total_amount;
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
                _ => stats.open += 1,
            }
        }

        stats
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quitanda_core::{CheckoutAttemptId, Email, OrderId};

    fn order(status: OrderStatus, cents: i64) -> Order {
        Order {
            id: OrderId::generate(),
            checkout_ref: CheckoutAttemptId::generate(),
            customer_name: "Cliente".to_owned(),
            customer_email: Email::parse("cliente@example.com").unwrap(),
            customer_phone: "(11) 90000-0000".to_owned(),
            delivery_address: "Rua A, 1".to_owned(),
            notes: None,
            total_amount: Money::from_cents(cents),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_collection() {
        let stats = OrderStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.revenue.is_zero());
    }

    #[test]
    fn test_revenue_counts_delivered_only() {
        let orders = vec![
            order(OrderStatus::Pending, 1000),
            order(OrderStatus::Preparing, 2000),
            order(OrderStatus::Delivered, 3500),
            order(OrderStatus::Delivered, 1500),
            order(OrderStatus::Cancelled, 9900),
        ];

        let stats = OrderStats::compute(&orders);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.revenue, Money::from_cents(5000));
    }
}
