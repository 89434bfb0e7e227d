//! Aggregate writer.
//!
//! Turns a [`GroupSpec`] into rows. Every function runs on a connection that
//! is inside a transaction; the caller commits.

use orbat_domain::{
    GroupId, GroupSpec, MemberId, MemberSpec, TeamId, TeamSpec, VehicleInstanceId,
    VehicleInstanceSpec, WeaponId,
};
use sqlx::SqliteConnection;

use super::{cascade::OwnedRows, catalog, reader};
use crate::infrastructure::ports::RepoError;

/// Insert a brand new group with all of its members, teams and vehicles.
pub async fn create_group(
    conn: &mut SqliteConnection,
    spec: &GroupSpec,
) -> Result<GroupId, RepoError> {
    let result = sqlx::query(
        "INSERT INTO groups (group_name, group_nationality, group_size, group_version) \
         VALUES (?, ?, 0, 0)",
    )
    .bind(spec.name.as_str())
    .bind(spec.nationality.as_str())
    .execute(&mut *conn)
    .await
    .map_err(|e| RepoError::database("insert_group", e))?;

    let group_id = GroupId::new(result.last_insert_rowid());
    write_contents(conn, group_id, spec).await?;
    Ok(group_id)
}

/// Replace an existing group in place: same id, bumped version, fresh members.
///
/// The guarded version bump is the first write, so a concurrent editor with
/// the same expected version fails with `Conflict` instead of interleaving.
pub async fn replace_group(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    spec: &GroupSpec,
    expected_version: Option<i64>,
) -> Result<i64, RepoError> {
    let result = sqlx::query(
        "UPDATE groups SET group_version = group_version + 1, \
         group_name = ?, group_nationality = ? \
         WHERE group_id = ? AND (? IS NULL OR group_version = ?)",
    )
    .bind(spec.name.as_str())
    .bind(spec.nationality.as_str())
    .bind(group_id.as_i64())
    .bind(expected_version)
    .bind(expected_version)
    .execute(&mut *conn)
    .await
    .map_err(|e| RepoError::database("bump_group_version", e))?;

    if result.rows_affected() == 0 {
        return Err(match reader::group_summary(conn, group_id).await? {
            None => RepoError::not_found("Group", group_id),
            Some(current) => RepoError::conflict(format!(
                "group {} is at version {}, expected {}",
                group_id,
                current.version,
                expected_version.unwrap_or_default()
            )),
        });
    }

    OwnedRows::collect(conn, group_id)
        .await?
        .delete(conn)
        .await?;
    write_contents(conn, group_id, spec).await?;

    let version = reader::group_summary(conn, group_id)
        .await?
        .map(|g| g.version)
        .ok_or_else(|| RepoError::not_found("Group", group_id))?;
    Ok(version)
}

/// Replace the weapon bindings of one member. Unknown weapon ids are skipped.
pub async fn replace_member_weapons(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    weapon_ids: &[WeaponId],
) -> Result<usize, RepoError> {
    if !reader::member_exists(conn, member_id).await? {
        return Err(RepoError::not_found("Member", member_id));
    }

    sqlx::query("DELETE FROM members_weapons WHERE member_id = ?")
        .bind(member_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("clear_member_weapons", e))?;

    let mut bound = 0;
    for weapon_id in weapon_ids {
        if bind_weapon(conn, member_id, *weapon_id).await? {
            bound += 1;
        }
    }
    Ok(bound)
}

/// Recount a group's members from its bindings after rows were removed
/// outside the aggregate writer. Bumps the version like any other edit.
pub async fn recompute_group_size(
    conn: &mut SqliteConnection,
    group_id: GroupId,
) -> Result<i64, RepoError> {
    let gid = group_id.as_i64();
    sqlx::query(
        "UPDATE groups SET group_version = group_version + 1, group_size = \
         (SELECT COUNT(*) FROM group_members WHERE group_id = ? AND member_id IS NOT NULL) + \
         (SELECT COUNT(*) FROM team_members tm \
          JOIN group_members gm ON gm.team_id = tm.team_id WHERE gm.group_id = ?) + \
         (SELECT COUNT(*) FROM vehicle_members vm \
          JOIN group_vehicles gv ON gv.instance_id = vm.instance_id WHERE gv.group_id = ?) \
         WHERE group_id = ?",
    )
    .bind(gid)
    .bind(gid)
    .bind(gid)
    .bind(gid)
    .execute(&mut *conn)
    .await
    .map_err(|e| RepoError::database("recompute_group_size", e))?;

    reader::group_summary(conn, group_id)
        .await?
        .map(|g| g.member_count)
        .ok_or_else(|| RepoError::not_found("Group", group_id))
}

/// Insert members, teams and vehicle instances, then store the total.
async fn write_contents(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    spec: &GroupSpec,
) -> Result<i64, RepoError> {
    let mut total: i64 = 0;

    for member in &spec.members {
        let member_id = insert_member(conn, member).await?;
        sqlx::query("INSERT INTO group_members (group_id, member_id, team_id) VALUES (?, ?, NULL)")
            .bind(group_id.as_i64())
            .bind(member_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("bind_direct_member", e))?;
        total += 1;
    }

    for team in &spec.teams {
        total += insert_team(conn, group_id, team).await?;
    }

    for vehicle in &spec.vehicles {
        total += insert_vehicle_instance(conn, group_id, vehicle).await?;
    }

    sqlx::query("UPDATE groups SET group_size = ? WHERE group_id = ?")
        .bind(total)
        .bind(group_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("update_group_size", e))?;

    tracing::debug!(group_id = %group_id, total, "Wrote group contents");
    Ok(total)
}

async fn insert_team(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    team: &TeamSpec,
) -> Result<i64, RepoError> {
    let size = i64::try_from(team.declared_size())
        .map_err(|_| RepoError::validation("team has too many members"))?;
    let result = sqlx::query("INSERT INTO teams (team_name, team_size) VALUES (?, ?)")
        .bind(team.name.as_str())
        .bind(size)
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("insert_team", e))?;
    let team_id = TeamId::new(result.last_insert_rowid());

    sqlx::query("INSERT INTO group_members (group_id, member_id, team_id) VALUES (?, NULL, ?)")
        .bind(group_id.as_i64())
        .bind(team_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("bind_team", e))?;

    for member in &team.members {
        let member_id = insert_member(conn, member).await?;
        sqlx::query("INSERT INTO team_members (team_id, member_id) VALUES (?, ?)")
            .bind(team_id.as_i64())
            .bind(member_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("bind_team_member", e))?;
    }

    Ok(size)
}

async fn insert_vehicle_instance(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    vehicle: &VehicleInstanceSpec,
) -> Result<i64, RepoError> {
    if !catalog::vehicle_exists(conn, vehicle.vehicle_id).await? {
        return Err(RepoError::validation(format!(
            "unknown vehicle id {}",
            vehicle.vehicle_id
        )));
    }

    let result = sqlx::query("INSERT INTO group_vehicles (group_id, vehicle_id) VALUES (?, ?)")
        .bind(group_id.as_i64())
        .bind(vehicle.vehicle_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("insert_vehicle_instance", e))?;
    let instance_id = VehicleInstanceId::new(result.last_insert_rowid());

    let mut crew = 0;
    for member in &vehicle.crew {
        let member_id = insert_member(conn, member).await?;
        sqlx::query("INSERT INTO vehicle_members (instance_id, member_id) VALUES (?, ?)")
            .bind(instance_id.as_i64())
            .bind(member_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("bind_vehicle_crew", e))?;
        crew += 1;
    }
    Ok(crew)
}

async fn insert_member(
    conn: &mut SqliteConnection,
    member: &MemberSpec,
) -> Result<MemberId, RepoError> {
    let result = sqlx::query("INSERT INTO members (member_role, member_rank) VALUES (?, ?)")
        .bind(&member.role)
        .bind(&member.rank)
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("insert_member", e))?;
    let member_id = MemberId::new(result.last_insert_rowid());

    for weapon_id in &member.weapon_ids {
        bind_weapon(conn, member_id, *weapon_id).await?;
    }
    Ok(member_id)
}

/// Bind a catalog weapon to a member; returns false when the weapon is unknown.
async fn bind_weapon(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    weapon_id: WeaponId,
) -> Result<bool, RepoError> {
    if !catalog::weapon_exists(conn, weapon_id).await? {
        tracing::debug!(member_id = %member_id, weapon_id = %weapon_id, "Skipping unknown weapon");
        return Ok(false);
    }

    sqlx::query("INSERT OR IGNORE INTO members_weapons (member_id, weapon_id) VALUES (?, ?)")
        .bind(member_id.as_i64())
        .bind(weapon_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("bind_member_weapon", e))?;
    Ok(true)
}
