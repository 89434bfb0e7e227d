//! Repository port traits for database access.

use async_trait::async_trait;
use orbat_domain::*;

use super::error::RepoError;

// =============================================================================
// Roster Storage
// =============================================================================

/// Group aggregates and everything they own.
///
/// Writes are all-or-nothing: an error means the store is unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepo: Send + Sync {
    // Reads
    async fn list_groups(&self) -> Result<Vec<GroupSummary>, RepoError>;
    async fn get_group(&self, id: GroupId) -> Result<GroupAggregate, RepoError>;

    // Aggregate writes
    async fn create_group(&self, spec: &GroupSpec) -> Result<GroupId, RepoError>;
    /// Replace the whole aggregate. `expected_version` guards against a
    /// concurrent edit; `None` skips the check.
    async fn replace_group(
        &self,
        id: GroupId,
        spec: &GroupSpec,
        expected_version: Option<i64>,
    ) -> Result<(), RepoError>;
    async fn delete_group(&self, id: GroupId) -> Result<(), RepoError>;

    // Member weapons
    async fn member_loadout(&self, member_id: MemberId) -> Result<MemberLoadout, RepoError>;
    async fn replace_member_weapons(
        &self,
        member_id: MemberId,
        weapon_ids: &[WeaponId],
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Catalog Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    // Weapons
    async fn list_weapons(&self) -> Result<Vec<Weapon>, RepoError>;
    async fn get_weapon(&self, id: WeaponId) -> Result<Weapon, RepoError>;
    async fn weapon_exists(&self, id: WeaponId) -> Result<bool, RepoError>;
    async fn find_weapon_by_name(&self, name: &str) -> Result<Option<WeaponId>, RepoError>;
    async fn upsert_weapon(&self, draft: &WeaponDraft, replace: bool) -> Result<WeaponId, RepoError>;
    /// Deletes the entry and its member bindings, returning its image reference.
    async fn delete_weapon(&self, id: WeaponId) -> Result<Option<String>, RepoError>;
    async fn weapon_usage(&self, id: WeaponId) -> Result<WeaponUsage, RepoError>;

    // Vehicles
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RepoError>;
    async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, RepoError>;
    async fn vehicle_exists(&self, id: VehicleId) -> Result<bool, RepoError>;
    async fn find_vehicle_by_name(&self, name: &str) -> Result<Option<VehicleId>, RepoError>;
    async fn upsert_vehicle(
        &self,
        draft: &VehicleDraft,
        replace: bool,
    ) -> Result<VehicleId, RepoError>;
    /// Deletes the entry with every instance and crew built from it,
    /// returning its image reference.
    async fn delete_vehicle(&self, id: VehicleId) -> Result<Option<String>, RepoError>;
    async fn vehicle_usage(&self, id: VehicleId) -> Result<VehicleUsage, RepoError>;

    // Nationalities, by stored code
    async fn list_nationalities(&self) -> Result<Vec<String>, RepoError>;
    /// NotFound when no group carries `code`.
    async fn nationality_usage(&self, code: &str) -> Result<NationalityUsage, RepoError>;
}
