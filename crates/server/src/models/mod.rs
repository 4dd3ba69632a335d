//! Domain records for the catalog, cart, and order pipeline.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartEntry;
pub use order::{CustomerInfo, NewOrder, NewOrderItem, Order, OrderItem, OrderWithItems};
pub use product::Product;
pub use user::CurrentUser;
