//! Order status state machine.

use serde::{Deserialize, Serialize};

/// Delivery lifecycle status of an order.
///
/// The usual path is `pending -> confirmed -> preparing -> out_for_delivery
/// -> delivered`, with `cancelled` reachable from any non-terminal state.
/// The policy is deliberately permissive: administrators may jump states out
/// of sequence (e.g. straight from `pending` to `out_for_delivery`), and the
/// only rule the machine enforces is that a terminal state is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted at checkout, awaiting review.
    #[default]
    Pending,
    /// Accepted by the store.
    Confirmed,
    /// Being picked and packed.
    Preparing,
    /// Handed to the courier.
    OutForDelivery,
    /// Received by the customer. Terminal.
    Delivered,
    /// Cancelled by the store. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Every defined status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether no further transitions are legal from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether the order is still moving through the delivery pipeline.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// Whether an administrator may move an order from `self` to `next`.
    ///
    /// Ordering between non-terminal states is not enforced; leaving a
    /// terminal state is never allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        // `next` is statically one of the defined states; only terminality
        // constrains the move.
        let _ = next;
        !self.is_terminal()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Pending.is_open());
        assert!(OrderStatus::OutForDelivery.is_open());
    }

    #[test]
    fn test_out_of_sequence_jumps_are_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_never_left() {
        for next in OrderStatus::ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("entregue".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
    }
}
