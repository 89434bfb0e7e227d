//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Roster and catalog storage (SQLite today)
//! - Catalog image blobs (local directory today, object storage in production)

mod error;
mod external;
mod repos;

pub use error::{ImageStoreError, RepoError};
pub use external::ImageStore;
pub use repos::{CatalogRepo, RosterRepo};

#[cfg(test)]
pub use external::MockImageStore;
#[cfg(test)]
pub use repos::{MockCatalogRepo, MockRosterRepo};
