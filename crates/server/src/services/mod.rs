//! Application services: the cart store, the checkout coordinator, the
//! order directory, and derived order statistics.

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod stats;

pub use cart::{CartError, CartStore, cart_total};
pub use checkout::{CheckoutError, CheckoutService};
pub use orders::{DirectoryError, OrderDirectory, StatusFilter};
pub use stats::OrderStats;
