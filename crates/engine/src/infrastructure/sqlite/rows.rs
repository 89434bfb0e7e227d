//! Row decoding shared by the reader and the catalog adapter.

use orbat_domain::{GroupId, GroupSummary, Vehicle, VehicleId, Weapon, WeaponId};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::infrastructure::ports::RepoError;

pub(crate) const WEAPON_COLUMNS: &str =
    "w.weapon_id, w.weapon_name, w.weapon_type, w.weapon_caliber, w.image_url";

pub(crate) const VEHICLE_COLUMNS: &str =
    "v.vehicle_id, v.vehicle_name, v.vehicle_type, v.vehicle_armament, v.image_url";

pub(crate) const GROUP_COLUMNS: &str =
    "g.group_id, g.group_name, g.group_nationality, g.group_size, g.group_version";

/// Every member with the group that owns it, over all three binding paths.
/// `team_id` is set only for team members.
pub(crate) const MEMBERSHIP: &str = "\
    SELECT member_id, group_id, NULL AS team_id \
    FROM group_members WHERE member_id IS NOT NULL \
    UNION ALL \
    SELECT tm.member_id, gm.group_id, tm.team_id \
    FROM team_members tm JOIN group_members gm ON gm.team_id = tm.team_id \
    UNION ALL \
    SELECT vm.member_id, gv.group_id, NULL AS team_id \
    FROM vehicle_members vm JOIN group_vehicles gv ON gv.instance_id = vm.instance_id";

pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(|e| RepoError::database("decode", e))
}

/// A `COUNT(..)` column as a size.
pub(crate) fn count(row: &SqliteRow, name: &str) -> Result<usize, RepoError> {
    let value: i64 = column(row, name)?;
    usize::try_from(value).map_err(|e| RepoError::database("decode", e))
}

pub(crate) fn weapon(row: &SqliteRow) -> Result<Weapon, RepoError> {
    Ok(Weapon {
        id: WeaponId::new(column(row, "weapon_id")?),
        name: column(row, "weapon_name")?,
        weapon_type: column(row, "weapon_type")?,
        caliber: column(row, "weapon_caliber")?,
        image_url: column(row, "image_url")?,
    })
}

pub(crate) fn vehicle(row: &SqliteRow) -> Result<Vehicle, RepoError> {
    Ok(Vehicle {
        id: VehicleId::new(column(row, "vehicle_id")?),
        name: column(row, "vehicle_name")?,
        vehicle_type: column(row, "vehicle_type")?,
        armament: column(row, "vehicle_armament")?,
        image_url: column(row, "image_url")?,
    })
}

pub(crate) fn group_summary(row: &SqliteRow) -> Result<GroupSummary, RepoError> {
    Ok(GroupSummary {
        id: GroupId::new(column(row, "group_id")?),
        name: column(row, "group_name")?,
        nationality: column(row, "group_nationality")?,
        member_count: column(row, "group_size")?,
        version: column(row, "group_version")?,
    })
}
