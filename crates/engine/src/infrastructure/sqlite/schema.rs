//! Roster schema and pool setup.
//!
//! Foreign keys are declared without `ON DELETE CASCADE`; owned rows are
//! removed explicitly by [`super::cascade`].

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS groups (
        group_id INTEGER PRIMARY KEY AUTOINCREMENT,
        group_name TEXT NOT NULL,
        group_nationality TEXT NOT NULL,
        group_size INTEGER NOT NULL DEFAULT 0,
        group_version INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        member_id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_role TEXT NOT NULL,
        member_rank TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        team_id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_name TEXT NOT NULL,
        team_size INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weapons (
        weapon_id INTEGER PRIMARY KEY AUTOINCREMENT,
        weapon_name TEXT NOT NULL UNIQUE,
        weapon_type TEXT NOT NULL,
        weapon_caliber TEXT NOT NULL,
        image_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        vehicle_id INTEGER PRIMARY KEY AUTOINCREMENT,
        vehicle_name TEXT NOT NULL UNIQUE,
        vehicle_type TEXT NOT NULL,
        vehicle_armament TEXT NOT NULL,
        image_url TEXT
    )
    "#,
    // Exactly one of member_id / team_id is set per row
    r#"
    CREATE TABLE IF NOT EXISTS group_members (
        group_id INTEGER NOT NULL REFERENCES groups(group_id),
        member_id INTEGER REFERENCES members(member_id),
        team_id INTEGER REFERENCES teams(team_id),
        CHECK ((member_id IS NULL) <> (team_id IS NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_members (
        team_id INTEGER NOT NULL REFERENCES teams(team_id),
        member_id INTEGER NOT NULL REFERENCES members(member_id),
        PRIMARY KEY (team_id, member_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS group_vehicles (
        instance_id INTEGER PRIMARY KEY AUTOINCREMENT,
        group_id INTEGER NOT NULL REFERENCES groups(group_id),
        vehicle_id INTEGER NOT NULL REFERENCES vehicles(vehicle_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicle_members (
        instance_id INTEGER NOT NULL REFERENCES group_vehicles(instance_id),
        member_id INTEGER NOT NULL REFERENCES members(member_id),
        PRIMARY KEY (instance_id, member_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members_weapons (
        member_id INTEGER NOT NULL REFERENCES members(member_id),
        weapon_id INTEGER NOT NULL REFERENCES weapons(weapon_id),
        PRIMARY KEY (member_id, weapon_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_group_members_group ON group_members(group_id)",
    "CREATE INDEX IF NOT EXISTS idx_group_vehicles_group ON group_vehicles(group_id)",
    "CREATE INDEX IF NOT EXISTS idx_group_vehicles_vehicle ON group_vehicles(vehicle_id)",
    "CREATE INDEX IF NOT EXISTS idx_members_weapons_weapon ON members_weapons(weapon_id)",
];

/// Open a pool with foreign key enforcement on every connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create every roster table and index that does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    tracing::debug!(statements = SCHEMA.len(), "Roster schema ensured");
    Ok(())
}
