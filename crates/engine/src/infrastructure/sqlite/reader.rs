//! Aggregate reader: rebuilds a nested group from the flat binding tables.
//!
//! One scoped query per nesting level, ordered by id so repeated reads of an
//! unchanged group are identical. No transaction is taken; callers that need
//! a consistent snapshot pass a transaction's connection.

use orbat_domain::{
    GroupAggregate, GroupId, GroupSummary, Member, MemberId, Team, TeamId, VehicleInstance,
    VehicleInstanceId, Weapon,
};
use sqlx::SqliteConnection;

use super::rows::{self, column, GROUP_COLUMNS, VEHICLE_COLUMNS, WEAPON_COLUMNS};
use crate::infrastructure::ports::RepoError;

/// All group rows, ordered by name.
pub async fn list_groups(conn: &mut SqliteConnection) -> Result<Vec<GroupSummary>, RepoError> {
    let sql = format!("SELECT {GROUP_COLUMNS} FROM groups g ORDER BY g.group_name, g.group_id");
    sqlx::query(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("list_groups", e))?
        .iter()
        .map(rows::group_summary)
        .collect()
}

pub async fn group_summary(
    conn: &mut SqliteConnection,
    id: GroupId,
) -> Result<Option<GroupSummary>, RepoError> {
    let sql = format!("SELECT {GROUP_COLUMNS} FROM groups g WHERE g.group_id = ?");
    sqlx::query(&sql)
        .bind(id.as_i64())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::database("group_summary", e))?
        .as_ref()
        .map(rows::group_summary)
        .transpose()
}

/// Read the full aggregate of one group.
pub async fn read_group(
    conn: &mut SqliteConnection,
    id: GroupId,
) -> Result<GroupAggregate, RepoError> {
    let summary = group_summary(conn, id)
        .await?
        .ok_or_else(|| RepoError::not_found("Group", id))?;

    let direct = direct_members(conn, id).await?;
    let teams = teams(conn, id).await?;
    let vehicles = vehicle_instances(conn, id).await?;

    Ok(GroupAggregate::new(summary, direct, teams, vehicles))
}

pub async fn member_weapons(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Vec<Weapon>, RepoError> {
    let sql = format!(
        "SELECT {WEAPON_COLUMNS} FROM members_weapons mw \
         JOIN weapons w ON w.weapon_id = mw.weapon_id \
         WHERE mw.member_id = ? ORDER BY w.weapon_id"
    );
    sqlx::query(&sql)
        .bind(member_id.as_i64())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("member_weapons", e))?
        .iter()
        .map(rows::weapon)
        .collect()
}

pub async fn member_exists(conn: &mut SqliteConnection, id: MemberId) -> Result<bool, RepoError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM members WHERE member_id = ?)")
        .bind(id.as_i64())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| RepoError::database("member_exists", e))
}

/// Load member rows selected by `sql` (one bound id) and attach their weapons.
async fn load_members(
    conn: &mut SqliteConnection,
    operation: &'static str,
    sql: &str,
    scope_id: i64,
) -> Result<Vec<Member>, RepoError> {
    let member_rows = sqlx::query(sql)
        .bind(scope_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database(operation, e))?;

    let mut members = Vec::with_capacity(member_rows.len());
    for row in &member_rows {
        let id = MemberId::new(column(row, "member_id")?);
        let weapons = member_weapons(conn, id).await?;
        members.push(Member {
            id,
            role: column(row, "member_role")?,
            rank: column(row, "member_rank")?,
            weapons,
        });
    }
    Ok(members)
}

async fn direct_members(
    conn: &mut SqliteConnection,
    group_id: GroupId,
) -> Result<Vec<Member>, RepoError> {
    load_members(
        conn,
        "direct_members",
        "SELECT m.member_id, m.member_role, m.member_rank FROM members m \
         JOIN group_members gm ON gm.member_id = m.member_id \
         WHERE gm.group_id = ? AND gm.team_id IS NULL ORDER BY m.member_id",
        group_id.as_i64(),
    )
    .await
}

async fn teams(conn: &mut SqliteConnection, group_id: GroupId) -> Result<Vec<Team>, RepoError> {
    let team_rows = sqlx::query(
        "SELECT t.team_id, t.team_name, t.team_size FROM teams t \
         JOIN group_members gm ON gm.team_id = t.team_id \
         WHERE gm.group_id = ? AND gm.member_id IS NULL ORDER BY t.team_id",
    )
    .bind(group_id.as_i64())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| RepoError::database("teams", e))?;

    let mut teams = Vec::with_capacity(team_rows.len());
    for row in &team_rows {
        let id = TeamId::new(column(row, "team_id")?);
        let members = load_members(
            conn,
            "team_members",
            "SELECT m.member_id, m.member_role, m.member_rank FROM members m \
             JOIN team_members tm ON tm.member_id = m.member_id \
             WHERE tm.team_id = ? ORDER BY m.member_id",
            id.as_i64(),
        )
        .await?;
        teams.push(Team {
            id,
            name: column(row, "team_name")?,
            size: column(row, "team_size")?,
            members,
        });
    }
    Ok(teams)
}

async fn vehicle_instances(
    conn: &mut SqliteConnection,
    group_id: GroupId,
) -> Result<Vec<VehicleInstance>, RepoError> {
    let sql = format!(
        "SELECT gv.instance_id, {VEHICLE_COLUMNS} FROM group_vehicles gv \
         JOIN vehicles v ON v.vehicle_id = gv.vehicle_id \
         WHERE gv.group_id = ? ORDER BY gv.instance_id"
    );
    let instance_rows = sqlx::query(&sql)
        .bind(group_id.as_i64())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("vehicle_instances", e))?;

    let mut instances = Vec::with_capacity(instance_rows.len());
    for row in &instance_rows {
        let instance_id = VehicleInstanceId::new(column(row, "instance_id")?);
        let crew = load_members(
            conn,
            "vehicle_crew",
            "SELECT m.member_id, m.member_role, m.member_rank FROM members m \
             JOIN vehicle_members vm ON vm.member_id = m.member_id \
             WHERE vm.instance_id = ? ORDER BY m.member_id",
            instance_id.as_i64(),
        )
        .await?;
        instances.push(VehicleInstance {
            instance_id,
            vehicle: rows::vehicle(row)?,
            crew,
        });
    }
    Ok(instances)
}
