//! Nationality roll-ups over the stored `group_nationality` codes.
//!
//! Codes are compared exactly as stored; "us" and "US" are different
//! nationalities here.

use orbat_domain::{NationalityUsage, NationalityVehicle, NationalityWeapon};
use sqlx::SqliteConnection;

use super::rows::{self, GROUP_COLUMNS, MEMBERSHIP, VEHICLE_COLUMNS, WEAPON_COLUMNS};
use crate::infrastructure::ports::RepoError;

/// Distinct nationality codes carried by at least one group, sorted.
pub async fn list_nationalities(conn: &mut SqliteConnection) -> Result<Vec<String>, RepoError> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT group_nationality FROM groups ORDER BY group_nationality",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| RepoError::database("list_nationalities", e))
}

/// Groups, weapons and vehicles of one nationality.
///
/// Fails with `NotFound` when no group carries the code.
pub async fn nationality_usage(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<NationalityUsage, RepoError> {
    let sql = format!(
        "SELECT {GROUP_COLUMNS} FROM groups g \
         WHERE g.group_nationality = ? ORDER BY g.group_name, g.group_id"
    );
    let groups = sqlx::query(&sql)
        .bind(code)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("nationality_groups", e))?
        .iter()
        .map(rows::group_summary)
        .collect::<Result<Vec<_>, _>>()?;

    if groups.is_empty() {
        return Err(RepoError::not_found("Nationality", code));
    }

    Ok(NationalityUsage {
        nationality: code.to_string(),
        groups,
        weapons: weapons(conn, code).await?,
        vehicles: vehicles(conn, code).await?,
    })
}

async fn weapons(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Vec<NationalityWeapon>, RepoError> {
    let sql = format!(
        "SELECT {WEAPON_COLUMNS}, COUNT(DISTINCT mw.member_id) AS user_count \
         FROM weapons w \
         JOIN members_weapons mw ON mw.weapon_id = w.weapon_id \
         JOIN ({MEMBERSHIP}) membership ON membership.member_id = mw.member_id \
         JOIN groups g ON g.group_id = membership.group_id \
         WHERE g.group_nationality = ? \
         GROUP BY w.weapon_id \
         ORDER BY w.weapon_name, w.weapon_id"
    );
    sqlx::query(&sql)
        .bind(code)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("nationality_weapons", e))?
        .iter()
        .map(|row| -> Result<_, RepoError> {
            Ok(NationalityWeapon {
                weapon: rows::weapon(row)?,
                user_count: rows::count(row, "user_count")?,
            })
        })
        .collect()
}

async fn vehicles(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Vec<NationalityVehicle>, RepoError> {
    let sql = format!(
        "SELECT {VEHICLE_COLUMNS}, COUNT(DISTINCT gv.instance_id) AS instance_count \
         FROM vehicles v \
         JOIN group_vehicles gv ON gv.vehicle_id = v.vehicle_id \
         JOIN groups g ON g.group_id = gv.group_id \
         WHERE g.group_nationality = ? \
         GROUP BY v.vehicle_id \
         ORDER BY v.vehicle_name, v.vehicle_id"
    );
    sqlx::query(&sql)
        .bind(code)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("nationality_vehicles", e))?
        .iter()
        .map(|row| -> Result<_, RepoError> {
            Ok(NationalityVehicle {
                vehicle: rows::vehicle(row)?,
                instance_count: rows::count(row, "instance_count")?,
            })
        })
        .collect()
}
