//! SQLite-backed roster storage.

use async_trait::async_trait;
use orbat_domain::{
    GroupAggregate, GroupId, GroupSpec, GroupSummary, MemberId, MemberLoadout, WeaponId,
};
use sqlx::SqlitePool;
use tracing::instrument;

use super::{begin, cascade, catalog, commit, reader, writer};
use crate::infrastructure::ports::{RepoError, RosterRepo};

/// Owns the pool and decides where each roster transaction begins and ends.
#[derive(Clone)]
pub struct SqliteRosterRepo {
    pool: SqlitePool,
}

impl SqliteRosterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepo for SqliteRosterRepo {
    async fn list_groups(&self) -> Result<Vec<GroupSummary>, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepoError::database("list_groups", e))?;
        reader::list_groups(&mut conn).await
    }

    #[instrument(skip(self), fields(group_id = %id))]
    async fn get_group(&self, id: GroupId) -> Result<GroupAggregate, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepoError::database("get_group", e))?;
        reader::read_group(&mut conn, id).await
    }

    #[instrument(skip(self, spec), fields(name = %spec.name))]
    async fn create_group(&self, spec: &GroupSpec) -> Result<GroupId, RepoError> {
        let mut tx = begin(&self.pool, "create_group").await?;
        let id = writer::create_group(&mut tx, spec).await?;
        commit(tx, "create_group").await?;

        tracing::info!(group_id = %id, members = spec.total_members(), "Group created");
        Ok(id)
    }

    #[instrument(skip(self, spec), fields(group_id = %id, expected_version = ?expected_version))]
    async fn replace_group(
        &self,
        id: GroupId,
        spec: &GroupSpec,
        expected_version: Option<i64>,
    ) -> Result<(), RepoError> {
        let mut tx = begin(&self.pool, "replace_group").await?;
        let version = writer::replace_group(&mut tx, id, spec, expected_version).await?;
        commit(tx, "replace_group").await?;

        tracing::info!(group_id = %id, version, members = spec.total_members(), "Group replaced");
        Ok(())
    }

    #[instrument(skip(self), fields(group_id = %id))]
    async fn delete_group(&self, id: GroupId) -> Result<(), RepoError> {
        let mut tx = begin(&self.pool, "delete_group").await?;
        cascade::delete_group(&mut tx, id).await?;
        commit(tx, "delete_group").await?;

        tracing::info!(group_id = %id, "Group deleted");
        Ok(())
    }

    async fn member_loadout(&self, member_id: MemberId) -> Result<MemberLoadout, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepoError::database("member_loadout", e))?;

        if !reader::member_exists(&mut conn, member_id).await? {
            return Err(RepoError::not_found("Member", member_id));
        }
        Ok(MemberLoadout {
            member_id,
            current: reader::member_weapons(&mut conn, member_id).await?,
            catalog: catalog::list_weapons(&mut conn).await?,
        })
    }

    #[instrument(skip(self), fields(member_id = %member_id))]
    async fn replace_member_weapons(
        &self,
        member_id: MemberId,
        weapon_ids: &[WeaponId],
    ) -> Result<(), RepoError> {
        let mut tx = begin(&self.pool, "replace_member_weapons").await?;
        let bound = writer::replace_member_weapons(&mut tx, member_id, weapon_ids).await?;
        commit(tx, "replace_member_weapons").await?;

        tracing::info!(
            member_id = %member_id,
            bound,
            skipped = weapon_ids.len() - bound,
            "Member weapons replaced"
        );
        Ok(())
    }
}
