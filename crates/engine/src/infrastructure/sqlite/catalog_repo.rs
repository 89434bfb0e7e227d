//! SQLite-backed weapon and vehicle catalog.

use std::collections::BTreeSet;

use async_trait::async_trait;
use orbat_domain::{
    GroupId, MemberId, NationalityUsage, UsageMember, UsageRow, UsageSummary, Vehicle,
    VehicleDraft, VehicleId, VehicleUsage, Weapon, WeaponDraft, WeaponId, WeaponUsage,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::instrument;

use super::rows::{column, MEMBERSHIP};
use super::{begin, catalog, commit, nationality, writer};
use crate::infrastructure::ports::{CatalogRepo, RepoError};

#[derive(Clone)]
pub struct SqliteCatalogRepo {
    pool: SqlitePool,
}

impl SqliteCatalogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn acquire(
        &self,
        operation: &'static str,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Sqlite>, RepoError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| RepoError::database(operation, e))
    }
}

#[async_trait]
impl CatalogRepo for SqliteCatalogRepo {
    // =========================================================================
    // Weapons
    // =========================================================================

    async fn list_weapons(&self) -> Result<Vec<Weapon>, RepoError> {
        let mut conn = self.acquire("list_weapons").await?;
        catalog::list_weapons(&mut conn).await
    }

    async fn get_weapon(&self, id: WeaponId) -> Result<Weapon, RepoError> {
        let mut conn = self.acquire("get_weapon").await?;
        catalog::get_weapon(&mut conn, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Weapon", id))
    }

    async fn weapon_exists(&self, id: WeaponId) -> Result<bool, RepoError> {
        let mut conn = self.acquire("weapon_exists").await?;
        catalog::weapon_exists(&mut conn, id).await
    }

    async fn find_weapon_by_name(&self, name: &str) -> Result<Option<WeaponId>, RepoError> {
        let mut conn = self.acquire("find_weapon_by_name").await?;
        catalog::find_weapon_by_name(&mut conn, name).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn upsert_weapon(&self, draft: &WeaponDraft, replace: bool) -> Result<WeaponId, RepoError> {
        let mut tx = begin(&self.pool, "upsert_weapon").await?;

        let id = match catalog::find_weapon_by_name(&mut tx, draft.name.as_str()).await? {
            Some(_) if !replace => {
                return Err(RepoError::conflict(format!(
                    "weapon '{}' already exists",
                    draft.name
                )));
            }
            Some(id) => {
                sqlx::query(
                    "UPDATE weapons SET weapon_type = ?, weapon_caliber = ?, \
                     image_url = COALESCE(?, image_url) WHERE weapon_id = ?",
                )
                .bind(&draft.weapon_type)
                .bind(&draft.caliber)
                .bind(draft.image_url.as_deref())
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("update_weapon", e))?;
                id
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO weapons (weapon_name, weapon_type, weapon_caliber, image_url) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(draft.name.as_str())
                .bind(&draft.weapon_type)
                .bind(&draft.caliber)
                .bind(draft.image_url.as_deref())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("insert_weapon", e))?;
                WeaponId::new(result.last_insert_rowid())
            }
        };

        commit(tx, "upsert_weapon").await?;
        tracing::info!(weapon_id = %id, "Weapon saved");
        Ok(id)
    }

    #[instrument(skip(self), fields(weapon_id = %id))]
    async fn delete_weapon(&self, id: WeaponId) -> Result<Option<String>, RepoError> {
        let mut tx = begin(&self.pool, "delete_weapon").await?;

        let weapon = catalog::get_weapon(&mut tx, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Weapon", id))?;

        let unbound = sqlx::query("DELETE FROM members_weapons WHERE weapon_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("unbind_weapon", e))?
            .rows_affected();

        sqlx::query("DELETE FROM weapons WHERE weapon_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_weapon", e))?;

        commit(tx, "delete_weapon").await?;
        tracing::info!(weapon_id = %id, unbound, "Weapon deleted");
        Ok(weapon.image_url)
    }

    async fn weapon_usage(&self, id: WeaponId) -> Result<WeaponUsage, RepoError> {
        let mut conn = self.acquire("weapon_usage").await?;
        let weapon = catalog::get_weapon(&mut conn, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Weapon", id))?;

        // One row per (member, weapon) binding, whichever path owns the member
        let sql = format!(
            "SELECT g.group_id, g.group_name, g.group_nationality, \
                    m.member_role, m.member_rank, t.team_name \
             FROM members_weapons mw \
             JOIN members m ON m.member_id = mw.member_id \
             JOIN ({MEMBERSHIP}) membership ON membership.member_id = m.member_id \
             JOIN groups g ON g.group_id = membership.group_id \
             LEFT JOIN teams t ON t.team_id = membership.team_id \
             WHERE mw.weapon_id = ? \
             ORDER BY g.group_name, g.group_id, t.team_name, m.member_id"
        );
        let rows = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| RepoError::database("weapon_usage", e))?;

        let usage = UsageSummary::from_rows(
            rows.iter()
                .map(usage_row)
                .collect::<Result<Vec<_>, _>>()?,
        );
        Ok(WeaponUsage { weapon, usage })
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RepoError> {
        let mut conn = self.acquire("list_vehicles").await?;
        catalog::list_vehicles(&mut conn).await
    }

    async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, RepoError> {
        let mut conn = self.acquire("get_vehicle").await?;
        catalog::get_vehicle(&mut conn, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Vehicle", id))
    }

    async fn vehicle_exists(&self, id: VehicleId) -> Result<bool, RepoError> {
        let mut conn = self.acquire("vehicle_exists").await?;
        catalog::vehicle_exists(&mut conn, id).await
    }

    async fn find_vehicle_by_name(&self, name: &str) -> Result<Option<VehicleId>, RepoError> {
        let mut conn = self.acquire("find_vehicle_by_name").await?;
        catalog::find_vehicle_by_name(&mut conn, name).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn upsert_vehicle(
        &self,
        draft: &VehicleDraft,
        replace: bool,
    ) -> Result<VehicleId, RepoError> {
        let mut tx = begin(&self.pool, "upsert_vehicle").await?;

        let id = match catalog::find_vehicle_by_name(&mut tx, draft.name.as_str()).await? {
            Some(_) if !replace => {
                return Err(RepoError::conflict(format!(
                    "vehicle '{}' already exists",
                    draft.name
                )));
            }
            Some(id) => {
                sqlx::query(
                    "UPDATE vehicles SET vehicle_type = ?, vehicle_armament = ?, \
                     image_url = COALESCE(?, image_url) WHERE vehicle_id = ?",
                )
                .bind(&draft.vehicle_type)
                .bind(&draft.armament)
                .bind(draft.image_url.as_deref())
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("update_vehicle", e))?;
                id
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO vehicles (vehicle_name, vehicle_type, vehicle_armament, image_url) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(draft.name.as_str())
                .bind(&draft.vehicle_type)
                .bind(&draft.armament)
                .bind(draft.image_url.as_deref())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("insert_vehicle", e))?;
                VehicleId::new(result.last_insert_rowid())
            }
        };

        commit(tx, "upsert_vehicle").await?;
        tracing::info!(vehicle_id = %id, "Vehicle saved");
        Ok(id)
    }

    #[instrument(skip(self), fields(vehicle_id = %id))]
    async fn delete_vehicle(&self, id: VehicleId) -> Result<Option<String>, RepoError> {
        let mut tx = begin(&self.pool, "delete_vehicle").await?;

        let vehicle = catalog::get_vehicle(&mut tx, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Vehicle", id))?;

        let instances = sqlx::query(
            "SELECT instance_id, group_id FROM group_vehicles \
             WHERE vehicle_id = ? ORDER BY instance_id",
        )
        .bind(id.as_i64())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| RepoError::database("vehicle_instances", e))?;

        let mut affected_groups = BTreeSet::new();
        for row in &instances {
            let instance_id: i64 = column(row, "instance_id")?;
            affected_groups.insert(GroupId::new(column(row, "group_id")?));
            delete_crew(&mut tx, instance_id).await?;
        }

        sqlx::query("DELETE FROM group_vehicles WHERE vehicle_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_vehicle_instances", e))?;

        for group_id in &affected_groups {
            let size = writer::recompute_group_size(&mut tx, *group_id).await?;
            tracing::debug!(group_id = %group_id, size, "Group size recomputed");
        }

        sqlx::query("DELETE FROM vehicles WHERE vehicle_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_vehicle", e))?;

        commit(tx, "delete_vehicle").await?;
        tracing::info!(
            vehicle_id = %id,
            instances = instances.len(),
            groups = affected_groups.len(),
            "Vehicle deleted"
        );
        Ok(vehicle.image_url)
    }

    async fn vehicle_usage(&self, id: VehicleId) -> Result<VehicleUsage, RepoError> {
        let mut conn = self.acquire("vehicle_usage").await?;
        let vehicle = catalog::get_vehicle(&mut conn, id)
            .await?
            .ok_or_else(|| RepoError::not_found("Vehicle", id))?;

        let instance_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM group_vehicles WHERE vehicle_id = ?")
                .bind(id.as_i64())
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| RepoError::database("vehicle_instance_count", e))?;

        let rows = sqlx::query(
            "SELECT g.group_id, g.group_name, g.group_nationality, \
                    m.member_role, m.member_rank, NULL AS team_name \
             FROM group_vehicles gv \
             JOIN groups g ON g.group_id = gv.group_id \
             JOIN vehicle_members vm ON vm.instance_id = gv.instance_id \
             JOIN members m ON m.member_id = vm.member_id \
             WHERE gv.vehicle_id = ? \
             ORDER BY g.group_name, g.group_id, gv.instance_id, m.member_id",
        )
        .bind(id.as_i64())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("vehicle_usage", e))?;

        let usage = UsageSummary::from_rows(
            rows.iter()
                .map(usage_row)
                .collect::<Result<Vec<_>, _>>()?,
        );
        Ok(VehicleUsage {
            vehicle,
            instance_count: usize::try_from(instance_count).unwrap_or_default(),
            usage,
        })
    }

    // =========================================================================
    // Nationalities
    // =========================================================================

    async fn list_nationalities(&self) -> Result<Vec<String>, RepoError> {
        let mut conn = self.acquire("list_nationalities").await?;
        nationality::list_nationalities(&mut conn).await
    }

    async fn nationality_usage(&self, code: &str) -> Result<NationalityUsage, RepoError> {
        let mut conn = self.acquire("nationality_usage").await?;
        nationality::nationality_usage(&mut conn, code).await
    }
}

/// Remove one vehicle instance's crew entirely, so no member is left unbound.
async fn delete_crew(conn: &mut SqliteConnection, instance_id: i64) -> Result<(), RepoError> {
    let crew = sqlx::query_scalar::<_, i64>(
        "SELECT member_id FROM vehicle_members WHERE instance_id = ?",
    )
    .bind(instance_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| RepoError::database("vehicle_crew", e))?;

    sqlx::query("DELETE FROM vehicle_members WHERE instance_id = ?")
        .bind(instance_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("unbind_vehicle_crew", e))?;

    for member_id in crew.into_iter().map(MemberId::new) {
        sqlx::query("DELETE FROM members_weapons WHERE member_id = ?")
            .bind(member_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("unbind_crew_weapons", e))?;
        sqlx::query("DELETE FROM members WHERE member_id = ?")
            .bind(member_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("delete_crew_member", e))?;
    }
    Ok(())
}

fn usage_row(row: &SqliteRow) -> Result<UsageRow, RepoError> {
    Ok(UsageRow {
        group_id: GroupId::new(column(row, "group_id")?),
        group_name: column(row, "group_name")?,
        nationality: column(row, "group_nationality")?,
        member: UsageMember {
            role: column(row, "member_role")?,
            rank: column(row, "member_rank")?,
            team_name: column(row, "team_name")?,
        },
    })
}
