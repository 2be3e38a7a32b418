//! Crop type administration service
//!
//! Crop types are the admin-defined species templates the simulation runs
//! against. They are immutable once created; there is deliberately no
//! update operation.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::storage::Storage;
use shared::{validate_name, CropType};

/// Crop type administration service
pub struct CropTypeService<S: Storage> {
    store: Arc<S>,
}

/// Input for creating a crop type
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCropTypeInput {
    pub name: String,
    /// Optimal daily mean temperature in °C
    pub optimal_temp: f64,
    /// Daily water requirement in mm
    pub needed_water: f64,
    /// Daily sunlight requirement in hours
    pub needed_light: f64,
    /// Length of the growth cycle in days
    pub days_cycle: u32,
    /// Biomass at planting in g/m²
    pub initial_biomass: f64,
    /// Maximum reachable biomass in g/m²
    pub potential_performance: f64,
}

impl<S: Storage> CropTypeService<S> {
    /// Create a new CropTypeService instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new crop type (admin only)
    pub fn create_crop_type(
        &self,
        requesting_user_id: Uuid,
        input: CreateCropTypeInput,
    ) -> AppResult<CropType> {
        // Only admins define crop types
        let requester = self
            .store
            .get_user_by_id(requesting_user_id)?
            .ok_or(AppError::UserNotFound(requesting_user_id))?;
        if !requester.role.is_admin() {
            return Err(AppError::Unauthorized(
                "Only admins can create crop types".to_string(),
            ));
        }

        // Validate input
        if let Err(message) = validate_name(&input.name) {
            return Err(AppError::validation("name", message));
        }

        // The engine divides by the optimal temperature
        if !input.optimal_temp.is_finite() || input.optimal_temp <= 0.0 {
            return Err(AppError::validation(
                "optimal_temp",
                "Optimal temperature must be a positive number",
            ));
        }

        if !input.needed_water.is_finite() || input.needed_water < 0.0 {
            return Err(AppError::validation(
                "needed_water",
                "Water requirement cannot be negative",
            ));
        }

        if !input.needed_light.is_finite() || input.needed_light < 0.0 {
            return Err(AppError::validation(
                "needed_light",
                "Light requirement cannot be negative",
            ));
        }

        if input.days_cycle < 1 {
            return Err(AppError::validation(
                "days_cycle",
                "Growth cycle must be at least 1 day",
            ));
        }

        if !input.initial_biomass.is_finite() || input.initial_biomass < 0.0 {
            return Err(AppError::validation(
                "initial_biomass",
                "Initial biomass cannot be negative",
            ));
        }

        // The engine divides by the potential, and the biomass ceiling must
        // hold from day zero
        if !input.potential_performance.is_finite() || input.potential_performance <= 0.0 {
            return Err(AppError::validation(
                "potential_performance",
                "Potential performance must be a positive number",
            ));
        }
        if input.potential_performance < input.initial_biomass {
            return Err(AppError::validation(
                "potential_performance",
                "Potential performance cannot be below the initial biomass",
            ));
        }

        // Check for duplicate name
        if self.store.get_crop_type_by_name(&input.name)?.is_some() {
            return Err(AppError::CropTypeExists(input.name));
        }

        let crop_type = CropType {
            id: Uuid::new_v4(),
            name: input.name,
            optimal_temp: input.optimal_temp,
            needed_water: input.needed_water,
            needed_light: input.needed_light,
            days_cycle: input.days_cycle,
            initial_biomass: input.initial_biomass,
            potential_performance: input.potential_performance,
        };
        self.store.save_crop_type(&crop_type)?;

        info!(crop_type_id = %crop_type.id, name = %crop_type.name, "crop type created");
        Ok(crop_type)
    }

    /// Get all crop types
    pub fn get_crop_types(&self) -> AppResult<Vec<CropType>> {
        Ok(self.store.get_crop_types()?)
    }

    /// Get a crop type by id
    pub fn get_crop_type_by_id(&self, crop_type_id: Uuid) -> AppResult<CropType> {
        self.store
            .get_crop_type_by_id(crop_type_id)?
            .ok_or(AppError::CropTypeNotFound(crop_type_id))
    }

    /// Get a crop type by name
    pub fn get_crop_type_by_name(&self, name: &str) -> AppResult<CropType> {
        self.store
            .get_crop_type_by_name(name)?
            .ok_or_else(|| AppError::CropTypeNameNotFound(name.to_string()))
    }

    /// Delete a crop type (admin only)
    ///
    /// Refused while any crop still references the type.
    pub fn delete_crop_type(&self, requesting_user_id: Uuid, crop_type_id: Uuid) -> AppResult<()> {
        let requester = self
            .store
            .get_user_by_id(requesting_user_id)?
            .ok_or(AppError::UserNotFound(requesting_user_id))?;
        if !requester.role.is_admin() {
            return Err(AppError::Unauthorized(
                "Only admins can delete crop types".to_string(),
            ));
        }

        if self.store.get_crop_type_by_id(crop_type_id)?.is_none() {
            return Err(AppError::CropTypeNotFound(crop_type_id));
        }

        // Check for crops linked to this type
        let linked = self.store.get_crops_by_type(crop_type_id)?.len();
        if linked > 0 {
            return Err(AppError::validation(
                "crop_type_id",
                format!("Cannot delete crop type: {} crops are linked to it", linked),
            ));
        }

        self.store.delete_crop_type(crop_type_id)?;

        info!(crop_type_id = %crop_type_id, "crop type deleted");
        Ok(())
    }
}
