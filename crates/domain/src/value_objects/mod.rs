//! Value objects for the roster domain

mod names;
mod roster_form;
mod roster_spec;
mod usage;

pub use names::{CatalogName, GroupName, NationalityCode, TeamName};
pub use roster_form::RosterForm;
pub use roster_spec::{GroupSpec, MemberSpec, TeamSpec, VehicleInstanceSpec};
pub use usage::{
    GroupUsage, NationalityUsage, NationalityVehicle, NationalityWeapon, UsageMember, UsageRow,
    UsageSummary, VehicleUsage, WeaponUsage,
};
