//! Roster entities as they are read back from storage

use serde::{Deserialize, Serialize};

use super::catalog::{Vehicle, Weapon};
use crate::{GroupId, MemberId, TeamId, VehicleInstanceId};

/// A roster member with the weapons bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub role: String,
    pub rank: String,
    pub weapons: Vec<Weapon>,
}

/// A sub-unit of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Declared size, written as the number of members at creation
    pub size: i64,
    pub members: Vec<Member>,
}

/// One catalog vehicle bound to a group, with its own crew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInstance {
    pub instance_id: VehicleInstanceId,
    pub vehicle: Vehicle,
    pub crew: Vec<Member>,
}

/// Flat view of a group row, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: String,
    pub nationality: String,
    /// Denormalized total of direct members, team members and crews
    pub member_count: i64,
    /// Optimistic concurrency counter, bumped by every edit
    pub version: i64,
}

/// A member's current weapons next to the full weapon catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLoadout {
    pub member_id: MemberId,
    pub current: Vec<Weapon>,
    pub catalog: Vec<Weapon>,
}

impl MemberLoadout {
    /// Whether a catalog weapon is currently carried by the member
    pub fn carries(&self, weapon: &Weapon) -> bool {
        self.current.iter().any(|w| w.id == weapon.id)
    }
}
