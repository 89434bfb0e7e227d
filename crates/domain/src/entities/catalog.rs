//! Shared weapon and vehicle catalog entries
//!
//! Catalog rows are reference data: groups point at them, but no roster
//! operation ever creates or deletes one.

use serde::{Deserialize, Serialize};

use crate::value_objects::CatalogName;
use crate::{VehicleId, WeaponId};

/// A weapon catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    pub weapon_type: String,
    pub caliber: String,
    pub image_url: Option<String>,
}

/// A vehicle catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub vehicle_type: String,
    pub armament: String,
    pub image_url: Option<String>,
}

/// Input for creating or replacing a weapon catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponDraft {
    pub name: CatalogName,
    pub weapon_type: String,
    pub caliber: String,
    /// `None` keeps the current image when replacing
    pub image_url: Option<String>,
}

impl WeaponDraft {
    pub fn new(name: CatalogName, weapon_type: impl Into<String>, caliber: impl Into<String>) -> Self {
        Self {
            name,
            weapon_type: weapon_type.into(),
            caliber: caliber.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Input for creating or replacing a vehicle catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub name: CatalogName,
    pub vehicle_type: String,
    pub armament: String,
    /// `None` keeps the current image when replacing
    pub image_url: Option<String>,
}

impl VehicleDraft {
    pub fn new(name: CatalogName, vehicle_type: impl Into<String>, armament: impl Into<String>) -> Self {
        Self {
            name,
            vehicle_type: vehicle_type.into(),
            armament: armament.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
