//! Domain entities

mod catalog;
mod roster;

pub use catalog::{Vehicle, VehicleDraft, Weapon, WeaponDraft};
pub use roster::{GroupSummary, Member, MemberLoadout, Team, VehicleInstance};
