//! SQLite roster store.
//!
//! - `reader`, `writer` and `cascade` work on a `&mut SqliteConnection` so
//!   they compose inside one transaction
//! - `SqliteRosterRepo` and `SqliteCatalogRepo` own the pool and decide where
//!   transactions begin

pub mod cascade;
pub mod catalog;
mod catalog_repo;
pub mod nationality;
pub mod reader;
mod roster_repo;
mod rows;
pub mod schema;
pub mod writer;

#[cfg(test)]
mod integration_tests;

pub use catalog_repo::SqliteCatalogRepo;
pub use roster_repo::SqliteRosterRepo;
pub use schema::{connect, ensure_schema};

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::infrastructure::ports::RepoError;

async fn begin(
    pool: &SqlitePool,
    operation: &'static str,
) -> Result<Transaction<'static, Sqlite>, RepoError> {
    pool.begin()
        .await
        .map_err(|e| RepoError::database(operation, e))
}

async fn commit(tx: Transaction<'static, Sqlite>, operation: &'static str) -> Result<(), RepoError> {
    tx.commit()
        .await
        .map_err(|e| RepoError::database(operation, e))
}
