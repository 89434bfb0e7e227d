//! Cascade deleter.
//!
//! The schema has no `ON DELETE CASCADE`, so everything a group owns is
//! removed here in dependency order. All functions expect a connection that
//! is already inside a transaction; a failure at any step leaves the caller
//! to roll back.

use orbat_domain::{GroupId, MemberId, TeamId, VehicleInstanceId};
use sqlx::SqliteConnection;

use crate::infrastructure::ports::RepoError;

/// Ids of every row exclusively owned by one group.
///
/// Collected up front, while the binding rows that lead to them still exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRows {
    pub group_id: GroupId,
    pub member_ids: Vec<MemberId>,
    pub team_ids: Vec<TeamId>,
    pub instance_ids: Vec<VehicleInstanceId>,
}

impl OwnedRows {
    pub async fn collect(conn: &mut SqliteConnection, group_id: GroupId) -> Result<Self, RepoError> {
        let gid = group_id.as_i64();

        // UNION also removes duplicates across the three paths
        let member_ids = sqlx::query_scalar::<_, i64>(
            "SELECT member_id FROM group_members WHERE group_id = ? AND member_id IS NOT NULL \
             UNION \
             SELECT tm.member_id FROM team_members tm \
             JOIN group_members gm ON gm.team_id = tm.team_id WHERE gm.group_id = ? \
             UNION \
             SELECT vm.member_id FROM vehicle_members vm \
             JOIN group_vehicles gv ON gv.instance_id = vm.instance_id WHERE gv.group_id = ? \
             ORDER BY 1",
        )
        .bind(gid)
        .bind(gid)
        .bind(gid)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("cascade_collect_members", e))?;

        let team_ids = sqlx::query_scalar::<_, i64>(
            "SELECT team_id FROM group_members \
             WHERE group_id = ? AND team_id IS NOT NULL ORDER BY team_id",
        )
        .bind(gid)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("cascade_collect_teams", e))?;

        let instance_ids = sqlx::query_scalar::<_, i64>(
            "SELECT instance_id FROM group_vehicles WHERE group_id = ? ORDER BY instance_id",
        )
        .bind(gid)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::database("cascade_collect_instances", e))?;

        Ok(Self {
            group_id,
            member_ids: member_ids.into_iter().map(MemberId::new).collect(),
            team_ids: team_ids.into_iter().map(TeamId::new).collect(),
            instance_ids: instance_ids.into_iter().map(VehicleInstanceId::new).collect(),
        })
    }

    /// Delete every owned row, leaving only the group row itself.
    pub async fn delete(&self, conn: &mut SqliteConnection) -> Result<(), RepoError> {
        let gid = self.group_id.as_i64();

        for member_id in &self.member_ids {
            execute(
                conn,
                "cascade_member_weapons",
                "DELETE FROM members_weapons WHERE member_id = ?",
                member_id.as_i64(),
            )
            .await?;
        }

        for instance_id in &self.instance_ids {
            execute(
                conn,
                "cascade_vehicle_crew",
                "DELETE FROM vehicle_members WHERE instance_id = ?",
                instance_id.as_i64(),
            )
            .await?;
        }

        execute(
            conn,
            "cascade_group_vehicles",
            "DELETE FROM group_vehicles WHERE group_id = ?",
            gid,
        )
        .await?;

        for team_id in &self.team_ids {
            execute(
                conn,
                "cascade_team_members",
                "DELETE FROM team_members WHERE team_id = ?",
                team_id.as_i64(),
            )
            .await?;
        }

        execute(
            conn,
            "cascade_group_members",
            "DELETE FROM group_members WHERE group_id = ?",
            gid,
        )
        .await?;

        for member_id in &self.member_ids {
            execute(
                conn,
                "cascade_members",
                "DELETE FROM members WHERE member_id = ?",
                member_id.as_i64(),
            )
            .await?;
        }

        for team_id in &self.team_ids {
            execute(
                conn,
                "cascade_teams",
                "DELETE FROM teams WHERE team_id = ?",
                team_id.as_i64(),
            )
            .await?;
        }

        tracing::debug!(
            group_id = %self.group_id,
            members = self.member_ids.len(),
            teams = self.team_ids.len(),
            vehicles = self.instance_ids.len(),
            "Deleted owned roster rows"
        );
        Ok(())
    }
}

/// Delete a group and everything it owns. Catalog rows are never touched.
pub async fn delete_group(conn: &mut SqliteConnection, group_id: GroupId) -> Result<(), RepoError> {
    let owned = OwnedRows::collect(conn, group_id).await?;
    owned.delete(conn).await?;

    let result = sqlx::query("DELETE FROM groups WHERE group_id = ?")
        .bind(group_id.as_i64())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("cascade_group", e))?;

    if result.rows_affected() == 0 {
        return Err(RepoError::not_found("Group", group_id));
    }
    Ok(())
}

async fn execute(
    conn: &mut SqliteConnection,
    operation: &'static str,
    sql: &str,
    id: i64,
) -> Result<u64, RepoError> {
    sqlx::query(sql)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map(|r| r.rows_affected())
        .map_err(|e| RepoError::database(operation, e))
}
