//! Group aggregate - the nested read model of one roster
//!
//! A group owns three disjoint sets of members: direct members, members of
//! its teams, and the crews of its vehicle instances. The aggregate is
//! assembled by the storage adapter and never mutated in place; edits go
//! through a fresh [`GroupSpec`](crate::value_objects::GroupSpec).

use std::collections::HashSet;

use serde::Serialize;

use crate::entities::{GroupSummary, Member, Team, VehicleInstance};
use crate::{GroupId, MemberId};

/// A complete group with everything it owns
///
/// # Invariants
///
/// - `summary.member_count` equals [`GroupAggregate::counted_members`] after
///   any successful write
/// - every member appears under exactly one of the three binding paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAggregate {
    #[serde(flatten)]
    summary: GroupSummary,
    direct_members: Vec<Member>,
    teams: Vec<Team>,
    vehicles: Vec<VehicleInstance>,
}

impl GroupAggregate {
    pub fn new(
        summary: GroupSummary,
        direct_members: Vec<Member>,
        teams: Vec<Team>,
        vehicles: Vec<VehicleInstance>,
    ) -> Self {
        Self {
            summary,
            direct_members,
            teams,
            vehicles,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> GroupId {
        self.summary.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    #[inline]
    pub fn nationality(&self) -> &str {
        &self.summary.nationality
    }

    /// The persisted, denormalized member count
    #[inline]
    pub fn member_count(&self) -> i64 {
        self.summary.member_count
    }

    #[inline]
    pub fn version(&self) -> i64 {
        self.summary.version
    }

    #[inline]
    pub fn summary(&self) -> &GroupSummary {
        &self.summary
    }

    #[inline]
    pub fn direct_members(&self) -> &[Member] {
        &self.direct_members
    }

    #[inline]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[inline]
    pub fn vehicles(&self) -> &[VehicleInstance] {
        &self.vehicles
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Members actually reachable from the group, across all three paths
    pub fn counted_members(&self) -> usize {
        self.direct_members.len()
            + self.teams.iter().map(|t| t.members.len()).sum::<usize>()
            + self.vehicles.iter().map(|v| v.crew.len()).sum::<usize>()
    }

    /// Whether the stored count agrees with the nested members
    pub fn is_size_consistent(&self) -> bool {
        i64::try_from(self.counted_members()).is_ok_and(|n| n == self.summary.member_count)
    }

    /// Every member of the group, in read order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.direct_members
            .iter()
            .chain(self.teams.iter().flat_map(|t| t.members.iter()))
            .chain(self.vehicles.iter().flat_map(|v| v.crew.iter()))
    }

    /// Ids of every member; duplicates would mean a member is bound twice
    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members().map(|m| m.id).collect()
    }

    /// True when no member id appears under more than one binding
    pub fn has_exclusive_membership(&self) -> bool {
        let mut seen = HashSet::new();
        self.members().all(|m| seen.insert(m.id))
    }
}
