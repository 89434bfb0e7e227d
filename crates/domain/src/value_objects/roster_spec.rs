//! Create/edit input for a whole group
//!
//! A `GroupSpec` describes the complete desired state of a group. Writing it
//! always produces fresh member, team and vehicle-instance rows.

use serde::{Deserialize, Serialize};

use super::names::{GroupName, NationalityCode, TeamName};
use crate::{VehicleId, WeaponId};

/// One member to create, with the catalog weapons it should carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSpec {
    pub role: String,
    pub rank: String,
    #[serde(default)]
    pub weapon_ids: Vec<WeaponId>,
}

impl MemberSpec {
    pub fn new(role: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            rank: rank.into(),
            weapon_ids: Vec::new(),
        }
    }

    pub fn with_weapons(mut self, weapon_ids: impl IntoIterator<Item = WeaponId>) -> Self {
        self.weapon_ids.extend(weapon_ids);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSpec {
    pub name: TeamName,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
}

impl TeamSpec {
    pub fn new(name: TeamName, members: Vec<MemberSpec>) -> Self {
        Self { name, members }
    }

    /// Size written to the team row
    pub fn declared_size(&self) -> usize {
        self.members.len()
    }
}

/// A catalog vehicle to attach to the group, with its crew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInstanceSpec {
    pub vehicle_id: VehicleId,
    #[serde(default)]
    pub crew: Vec<MemberSpec>,
}

impl VehicleInstanceSpec {
    pub fn new(vehicle_id: VehicleId, crew: Vec<MemberSpec>) -> Self {
        Self { vehicle_id, crew }
    }
}

/// Complete desired state of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub name: GroupName,
    pub nationality: NationalityCode,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
    #[serde(default)]
    pub teams: Vec<TeamSpec>,
    #[serde(default)]
    pub vehicles: Vec<VehicleInstanceSpec>,
}

impl GroupSpec {
    pub fn new(name: GroupName, nationality: NationalityCode) -> Self {
        Self {
            name,
            nationality,
            members: Vec::new(),
            teams: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberSpec) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_team(mut self, team: TeamSpec) -> Self {
        self.teams.push(team);
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleInstanceSpec) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Member count the group row must hold once this spec is written
    pub fn total_members(&self) -> usize {
        self.members.len()
            + self.teams.iter().map(TeamSpec::declared_size).sum::<usize>()
            + self.vehicles.iter().map(|v| v.crew.len()).sum::<usize>()
    }
}
