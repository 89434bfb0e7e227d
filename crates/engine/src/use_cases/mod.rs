//! Use cases - user stories orchestrated over the ports.

pub mod catalog;
pub mod roster;

pub use catalog::{CatalogError, CatalogOps};
pub use roster::{RosterError, RosterOps};
