//! Catalog accessors.
//!
//! Plain lookups over the weapon and vehicle tables. The aggregate writer
//! uses the `*_exists` checks to validate referenced ids inside its
//! transaction; the catalog repository builds on the rest.

use orbat_domain::{Vehicle, VehicleId, Weapon, WeaponId};
use sqlx::SqliteConnection;

use super::rows::{self, VEHICLE_COLUMNS, WEAPON_COLUMNS};
use crate::infrastructure::ports::RepoError;

pub async fn list_weapons(conn: &mut SqliteConnection) -> Result<Vec<Weapon>, RepoError> {
    let sql = format!("SELECT {WEAPON_COLUMNS} FROM weapons w ORDER BY w.weapon_name, w.weapon_id");
    sqlx::query(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("list_weapons", e))?
        .iter()
        .map(rows::weapon)
        .collect()
}

pub async fn get_weapon(
    conn: &mut SqliteConnection,
    id: WeaponId,
) -> Result<Option<Weapon>, RepoError> {
    let sql = format!("SELECT {WEAPON_COLUMNS} FROM weapons w WHERE w.weapon_id = ?");
    sqlx::query(&sql)
        .bind(id.as_i64())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::database("get_weapon", e))?
        .as_ref()
        .map(rows::weapon)
        .transpose()
}

pub async fn weapon_exists(conn: &mut SqliteConnection, id: WeaponId) -> Result<bool, RepoError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM weapons WHERE weapon_id = ?)")
        .bind(id.as_i64())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| RepoError::database("weapon_exists", e))
}

pub async fn find_weapon_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<WeaponId>, RepoError> {
    sqlx::query_scalar::<_, i64>("SELECT weapon_id FROM weapons WHERE weapon_name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map(|id| id.map(WeaponId::new))
        .map_err(|e| RepoError::database("find_weapon_by_name", e))
}

pub async fn list_vehicles(conn: &mut SqliteConnection) -> Result<Vec<Vehicle>, RepoError> {
    let sql =
        format!("SELECT {VEHICLE_COLUMNS} FROM vehicles v ORDER BY v.vehicle_name, v.vehicle_id");
    sqlx::query(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("list_vehicles", e))?
        .iter()
        .map(rows::vehicle)
        .collect()
}

pub async fn get_vehicle(
    conn: &mut SqliteConnection,
    id: VehicleId,
) -> Result<Option<Vehicle>, RepoError> {
    let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles v WHERE v.vehicle_id = ?");
    sqlx::query(&sql)
        .bind(id.as_i64())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::database("get_vehicle", e))?
        .as_ref()
        .map(rows::vehicle)
        .transpose()
}

pub async fn vehicle_exists(conn: &mut SqliteConnection, id: VehicleId) -> Result<bool, RepoError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vehicles WHERE vehicle_id = ?)")
        .bind(id.as_i64())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| RepoError::database("vehicle_exists", e))
}

pub async fn find_vehicle_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<VehicleId>, RepoError> {
    sqlx::query_scalar::<_, i64>("SELECT vehicle_id FROM vehicles WHERE vehicle_name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map(|id| id.map(VehicleId::new))
        .map_err(|e| RepoError::database("find_vehicle_by_name", e))
}
