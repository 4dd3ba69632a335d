//! Quitanda Core - Shared types library.
//!
//! This crate provides common types used across all Quitanda components:
//! - `server` - HTTP API serving the storefront and admin order surfaces
//! - `cli` - Command-line tools for catalog seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, roles,
//!   and the order status state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
