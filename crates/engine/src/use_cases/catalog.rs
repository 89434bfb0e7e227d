//! Catalog use cases: weapon and vehicle CRUD plus usage reports.

use std::sync::Arc;

use orbat_domain::{
    DomainError, NationalityCode, NationalityUsage, Vehicle, VehicleDraft, VehicleId, VehicleUsage,
    Weapon, WeaponDraft, WeaponId, WeaponUsage,
};
use tracing::instrument;

use crate::infrastructure::ports::{CatalogRepo, ImageStore, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Transaction failed: {0}")]
    TransactionFailure(#[source] RepoError),
    /// Duplicate catalog name without `replace`
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepoError> for CatalogError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            RepoError::Validation(msg) => Self::Validation(msg),
            RepoError::Conflict(msg) => Self::Conflict(msg),
            err @ RepoError::Database { .. } => Self::TransactionFailure(err),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub struct CatalogOps {
    catalog: Arc<dyn CatalogRepo>,
    images: Arc<dyn ImageStore>,
}

impl CatalogOps {
    pub fn new(catalog: Arc<dyn CatalogRepo>, images: Arc<dyn ImageStore>) -> Self {
        Self { catalog, images }
    }

    // =========================================================================
    // Weapons
    // =========================================================================

    pub async fn list_weapons(&self) -> Result<Vec<Weapon>, CatalogError> {
        Ok(self.catalog.list_weapons().await?)
    }

    pub async fn get_weapon(&self, id: WeaponId) -> Result<Weapon, CatalogError> {
        Ok(self.catalog.get_weapon(id).await?)
    }

    pub async fn weapon_exists(&self, id: WeaponId) -> Result<bool, CatalogError> {
        Ok(self.catalog.weapon_exists(id).await?)
    }

    pub async fn find_weapon_by_name(&self, name: &str) -> Result<Option<WeaponId>, CatalogError> {
        Ok(self.catalog.find_weapon_by_name(name.trim()).await?)
    }

    /// Create a weapon, or update the existing entry of the same name when
    /// `replace` is set.
    pub async fn save_weapon(
        &self,
        draft: &WeaponDraft,
        replace: bool,
    ) -> Result<WeaponId, CatalogError> {
        Ok(self.catalog.upsert_weapon(draft, replace).await?)
    }

    #[instrument(skip(self), fields(weapon_id = %id))]
    pub async fn delete_weapon(&self, id: WeaponId) -> Result<(), CatalogError> {
        let image_url = self.catalog.delete_weapon(id).await?;
        self.discard_image(image_url).await;
        Ok(())
    }

    pub async fn weapon_usage(&self, id: WeaponId) -> Result<WeaponUsage, CatalogError> {
        Ok(self.catalog.weapon_usage(id).await?)
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, CatalogError> {
        Ok(self.catalog.list_vehicles().await?)
    }

    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, CatalogError> {
        Ok(self.catalog.get_vehicle(id).await?)
    }

    pub async fn vehicle_exists(&self, id: VehicleId) -> Result<bool, CatalogError> {
        Ok(self.catalog.vehicle_exists(id).await?)
    }

    pub async fn find_vehicle_by_name(
        &self,
        name: &str,
    ) -> Result<Option<VehicleId>, CatalogError> {
        Ok(self.catalog.find_vehicle_by_name(name.trim()).await?)
    }

    pub async fn save_vehicle(
        &self,
        draft: &VehicleDraft,
        replace: bool,
    ) -> Result<VehicleId, CatalogError> {
        Ok(self.catalog.upsert_vehicle(draft, replace).await?)
    }

    /// Delete a vehicle with every instance and crew built from it.
    #[instrument(skip(self), fields(vehicle_id = %id))]
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<(), CatalogError> {
        let image_url = self.catalog.delete_vehicle(id).await?;
        self.discard_image(image_url).await;
        Ok(())
    }

    pub async fn vehicle_usage(&self, id: VehicleId) -> Result<VehicleUsage, CatalogError> {
        Ok(self.catalog.vehicle_usage(id).await?)
    }

    // =========================================================================
    // Nationalities
    // =========================================================================

    pub async fn list_nationalities(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.catalog.list_nationalities().await?)
    }

    /// Groups, weapon users and vehicle instances of one stored nationality code.
    pub async fn nationality_usage(&self, code: &str) -> Result<NationalityUsage, CatalogError> {
        let code = NationalityCode::new(code)?;
        Ok(self.catalog.nationality_usage(code.as_str()).await?)
    }

    /// The catalog row is already gone; a stray blob is only worth a warning.
    async fn discard_image(&self, image_url: Option<String>) {
        let Some(url) = image_url.filter(|u| !u.trim().is_empty()) else {
            return;
        };
        if let Err(e) = self.images.delete(&url).await {
            tracing::warn!(error = %e, image_url = %url, "Failed to delete catalog image");
        }
    }
}
