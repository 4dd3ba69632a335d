//! Persistence boundaries.
//!
//! The order collections and the cart's key-value snapshot live behind
//! narrow trait contracts: each call either fully succeeds or fails for that
//! one record, and nothing here implements cross-record transactions. The
//! checkout coordinator is written against that contract, not against a
//! particular backend.
//!
//! - [`kv`] - string key-value store backing the persisted cart snapshot
//! - [`orders`] - order / order-item repository

pub mod kv;
pub mod orders;

use thiserror::Error;

pub use kv::{FileKvStore, InMemoryKvStore, KvError, KvStore};
pub use orders::{InMemoryOrderRepository, OrderFilter, OrderRepository};

/// Errors from the order persistence boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store rejected or failed the call.
    #[error("storage error: {0}")]
    Storage(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate checkout reference).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
