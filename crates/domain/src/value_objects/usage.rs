//! Catalog usage reports
//!
//! Storage yields one flat row per member using a weapon or crewing a
//! vehicle; the report groups them by roster group.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::entities::{GroupSummary, Vehicle, Weapon};
use crate::GroupId;

/// A member seen through a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMember {
    pub role: String,
    pub rank: String,
    /// Set when the member belongs to a team
    pub team_name: Option<String>,
}

/// One flat usage row as produced by the storage query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRow {
    pub group_id: GroupId,
    pub group_name: String,
    pub nationality: String,
    pub member: UsageMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUsage {
    pub group_id: GroupId,
    pub group_name: String,
    pub nationality: String,
    pub members: Vec<UsageMember>,
}

/// Usage grouped per roster group, plus the distinct nationalities involved
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_members: usize,
    pub groups: Vec<GroupUsage>,
    pub nationalities: Vec<String>,
}

impl UsageSummary {
    /// Fold rows into per-group buckets. Rows of one group must be adjacent.
    pub fn from_rows(rows: impl IntoIterator<Item = UsageRow>) -> Self {
        let mut groups: Vec<GroupUsage> = Vec::new();
        let mut nationalities = BTreeSet::new();
        let mut total_members = 0;

        for row in rows {
            total_members += 1;
            nationalities.insert(row.nationality.clone());
            match groups.last_mut() {
                Some(current) if current.group_id == row.group_id => {
                    current.members.push(row.member);
                }
                _ => groups.push(GroupUsage {
                    group_id: row.group_id,
                    group_name: row.group_name,
                    nationality: row.nationality,
                    members: vec![row.member],
                }),
            }
        }

        Self {
            total_members,
            groups,
            nationalities: nationalities.into_iter().collect(),
        }
    }

    pub fn nationality_count(&self) -> usize {
        self.nationalities.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponUsage {
    pub weapon: Weapon,
    #[serde(flatten)]
    pub usage: UsageSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUsage {
    pub vehicle: Vehicle,
    /// Number of group vehicle instances built from this catalog entry
    pub instance_count: usize,
    #[serde(flatten)]
    pub usage: UsageSummary,
}

/// A weapon as carried within one nationality
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalityWeapon {
    #[serde(flatten)]
    pub weapon: Weapon,
    /// Distinct members of the nationality carrying it
    pub user_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalityVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    /// Distinct instances fielded by groups of the nationality
    pub instance_count: usize,
}

/// Roll-up of every group sharing one stored nationality code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalityUsage {
    pub nationality: String,
    pub groups: Vec<GroupSummary>,
    pub weapons: Vec<NationalityWeapon>,
    pub vehicles: Vec<NationalityVehicle>,
}

impl NationalityUsage {
    /// Members across all groups of the nationality, from the stored group sizes
    pub fn member_count(&self) -> i64 {
        self.groups.iter().map(|g| g.member_count).sum()
    }
}
