//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod image_store;
pub mod ports;
pub mod sqlite;
