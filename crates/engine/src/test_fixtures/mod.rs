//! Common test helpers for the SQLite roster store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{memory_pool, roster_seeder};
//!
//! #[tokio::test]
//! async fn roster_roundtrip() {
//!     let pool = memory_pool().await;
//!     let catalog = roster_seeder::seed_catalog(&pool).await;
//!     // ... test logic
//! }
//! ```

pub mod roster_seeder;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::sqlite::ensure_schema;

/// In-memory database behind a single pooled connection, schema applied.
///
/// # Panics
///
/// Panics if SQLite cannot be opened.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("open in-memory sqlite");
    ensure_schema(&pool).await.expect("ensure schema");
    pool
}

/// Row count of an arbitrary `SELECT COUNT(*)` query.
pub async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count query failed: {sql}: {e}"))
}

/// Make every insert of a member with the given role fail, to exercise rollback.
pub async fn fail_inserts_of_role(pool: &SqlitePool, role: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_member_insert BEFORE INSERT ON members \
         WHEN NEW.member_role = '{}' \
         BEGIN SELECT RAISE(ABORT, 'simulated insert failure'); END",
        role.replace('\'', "''")
    );
    sqlx::query(&sql)
        .execute(pool)
        .await
        .expect("create failure trigger");
}
