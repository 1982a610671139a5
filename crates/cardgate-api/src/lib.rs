//! cardgate HTTP gate library.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

/// Access token hashing and comparison.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
/// Request guards: Bearer token extraction and access checks.
pub mod middleware;
pub mod models;
pub mod router;
