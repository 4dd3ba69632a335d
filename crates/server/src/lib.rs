//! Quitanda server library.
//!
//! Exposes the order pipeline as a library so integration tests can drive
//! the services directly, without a running HTTP server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
