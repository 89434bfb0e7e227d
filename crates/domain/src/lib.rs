//! ORBAT domain: roster ids, entities, the group aggregate and its inputs.
//!
//! Storage agnostic; the engine crate maps these types onto SQLite.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::GroupAggregate;
pub use entities::{
    GroupSummary, Member, MemberLoadout, Team, Vehicle, VehicleDraft, VehicleInstance, Weapon,
    WeaponDraft,
};
pub use error::DomainError;

// Re-export ID types
pub use ids::{GroupId, MemberId, TeamId, VehicleId, VehicleInstanceId, WeaponId};

pub use value_objects::{
    CatalogName, GroupName, GroupSpec, GroupUsage, MemberSpec, NationalityCode, NationalityUsage,
    NationalityVehicle, NationalityWeapon, RosterForm, TeamName, TeamSpec, UsageMember, UsageRow,
    UsageSummary, VehicleInstanceSpec, VehicleUsage, WeaponUsage,
};
