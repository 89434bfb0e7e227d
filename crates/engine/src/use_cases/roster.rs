//! Roster use cases: read, create, edit and delete whole groups.

use std::sync::Arc;

use orbat_domain::{
    DomainError, GroupAggregate, GroupId, GroupSpec, GroupSummary, MemberId, MemberLoadout,
    RosterForm, WeaponId,
};
use tracing::instrument;

use crate::infrastructure::ports::{RepoError, RosterRepo};

/// Caller-facing errors of roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The store failed mid-operation; writes were rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailure(#[source] RepoError),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepoError> for RosterError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            RepoError::Validation(msg) => Self::Validation(msg),
            RepoError::Conflict(msg) => Self::Conflict(msg),
            err @ RepoError::Database { .. } => Self::TransactionFailure(err),
        }
    }
}

impl From<DomainError> for RosterError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub struct RosterOps {
    roster: Arc<dyn RosterRepo>,
}

impl RosterOps {
    pub fn new(roster: Arc<dyn RosterRepo>) -> Self {
        Self { roster }
    }

    pub async fn list_groups(&self) -> Result<Vec<GroupSummary>, RosterError> {
        Ok(self.roster.list_groups().await?)
    }

    pub async fn get_group(&self, id: GroupId) -> Result<GroupAggregate, RosterError> {
        Ok(self.roster.get_group(id).await?)
    }

    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub async fn create_group(&self, spec: &GroupSpec) -> Result<GroupId, RosterError> {
        let id = self.roster.create_group(spec).await?;
        tracing::info!(group_id = %id, "Roster created");
        Ok(id)
    }

    /// Decode a submitted roster form and create the group it describes.
    pub async fn create_from_form<I, K, V>(&self, pairs: I) -> Result<GroupId, RosterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let spec = RosterForm::from_pairs(pairs).into_spec()?;
        self.create_group(&spec).await
    }

    /// Replace the group with the given spec. Member ids change.
    #[instrument(skip(self, spec), fields(group_id = %id))]
    pub async fn replace_group(
        &self,
        id: GroupId,
        spec: &GroupSpec,
        expected_version: Option<i64>,
    ) -> Result<(), RosterError> {
        self.roster.replace_group(id, spec, expected_version).await?;
        tracing::info!(group_id = %id, "Roster replaced");
        Ok(())
    }

    pub async fn replace_from_form<I, K, V>(
        &self,
        id: GroupId,
        pairs: I,
        expected_version: Option<i64>,
    ) -> Result<(), RosterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let spec = RosterForm::from_pairs(pairs).into_spec()?;
        self.replace_group(id, &spec, expected_version).await
    }

    #[instrument(skip(self), fields(group_id = %id))]
    pub async fn delete_group(&self, id: GroupId) -> Result<(), RosterError> {
        self.roster.delete_group(id).await?;
        tracing::info!(group_id = %id, "Roster deleted");
        Ok(())
    }

    pub async fn member_loadout(&self, member_id: MemberId) -> Result<MemberLoadout, RosterError> {
        Ok(self.roster.member_loadout(member_id).await?)
    }

    pub async fn replace_member_weapons(
        &self,
        member_id: MemberId,
        weapon_ids: &[WeaponId],
    ) -> Result<(), RosterError> {
        Ok(self
            .roster
            .replace_member_weapons(member_id, weapon_ids)
            .await?)
    }
}
