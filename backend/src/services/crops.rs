//! Crop lifecycle service
//!
//! The outward face of the simulation: planting, day-by-day growth,
//! ownership-gated reads and updates, and deletion. Validation order is
//! significant in every operation: input shape first, then existence, then
//! state and ownership; the first failing check decides the error.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine;
use crate::error::{AppError, AppResult};
use crate::storage::Storage;
use shared::{
    validate_name, validate_rain, validate_sun_hours, validate_temperature, Crop, DailyCondition,
};

/// Crop lifecycle service
pub struct CropService<S: Storage> {
    store: Arc<S>,
}

/// Input for updating a crop
///
/// Only the name and the active flag are mutable; everything else on a crop
/// is written exclusively by `simulate_day`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCropInput {
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Aggregated statistics over a crop's recorded days
#[derive(Debug, Clone, Serialize)]
pub struct CropStatistics {
    pub crop_id: Uuid,
    pub days_recorded: usize,
    pub average_temperature: f64,
    pub average_rain: f64,
    pub average_sun_hours: f64,
    /// Final biomass minus the crop type's initial biomass
    pub total_growth: f64,
    /// Days whose temperature fell outside [0.8, 1.2] x optimal
    pub stress_days: usize,
    /// Final biomass as a fraction of the potential performance
    pub performance_ratio: f64,
}

impl<S: Storage> CropService<S> {
    /// Create a new CropService instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Plant a new crop for a user
    pub fn create_crop(
        &self,
        name: &str,
        crop_type_id: Uuid,
        user_id: Uuid,
        start_date: NaiveDateTime,
    ) -> AppResult<Crop> {
        // Validate input
        if let Err(message) = validate_name(name) {
            return Err(AppError::validation("name", message));
        }

        let mut owner = self
            .store
            .get_user_by_id(user_id)?
            .ok_or(AppError::UserNotFound(user_id))?;

        if self.store.get_crop_type_by_id(crop_type_id)?.is_none() {
            return Err(AppError::CropTypeNotFound(crop_type_id));
        }

        let crop = Crop {
            id: Uuid::new_v4(),
            user_id,
            crop_type_id,
            name: name.to_string(),
            start_date,
            last_sim_date: start_date,
            conditions: vec![],
            active: true,
        };
        self.store.save_crop(&crop)?;

        // Register the crop with its owner. This is a second write: a crash
        // in between leaves a crop whose owner does not list it.
        owner.crop_ids.push(crop.id);
        self.store.save_user(&owner)?;

        info!(crop_id = %crop.id, user_id = %user_id, name = %crop.name, "crop created");
        Ok(crop)
    }

    /// Simulate one day of growth under the given weather
    ///
    /// Owner-only: unlike the read operations, an admin gets no override
    /// here. Appends a `DailyCondition`, advances `last_sim_date` by one
    /// day, and deactivates the crop when the cycle completes.
    pub fn simulate_day(
        &self,
        crop_id: Uuid,
        user_id: Uuid,
        temperature: f64,
        rain: f64,
        sun_hours: f64,
    ) -> AppResult<Crop> {
        // Weather bounds are checked before any lookup
        if let Err(message) = validate_temperature(temperature) {
            return Err(AppError::validation("temperature", message));
        }
        if let Err(message) = validate_rain(rain) {
            return Err(AppError::validation("rain", message));
        }
        if let Err(message) = validate_sun_hours(sun_hours) {
            return Err(AppError::validation("sun_hours", message));
        }

        let mut crop = self
            .store
            .get_crop_by_id(crop_id)?
            .ok_or(AppError::CropNotFound(crop_id))?;
        let crop_type = self
            .store
            .get_crop_type_by_id(crop.crop_type_id)?
            .ok_or(AppError::CropTypeNotFound(crop.crop_type_id))?;

        if !crop.active {
            return Err(AppError::validation(
                "crop_id",
                "Crop is no longer active",
            ));
        }

        if crop.user_id != user_id {
            return Err(AppError::Ownership { user_id, crop_id });
        }

        if crop.days_simulated() >= crop_type.days_cycle as usize {
            return Err(AppError::validation(
                "crop_id",
                "Growth cycle is already complete",
            ));
        }

        // Factors are computed from the state before the append
        let environment = engine::environment_factor(&crop_type, temperature, rain, sun_hours);
        let phase = engine::phase_factor(&crop, &crop_type);
        let capacity = engine::capacity_factor(&crop, &crop_type);
        let growth = engine::daily_growth(&crop_type, environment, phase, capacity);
        let biomass = engine::next_biomass(
            engine::current_biomass(&crop, &crop_type),
            growth,
            &crop_type,
        );

        crop.conditions.push(DailyCondition {
            day: crop.conditions.len() as u32 + 1,
            temperature,
            rain,
            sun_hours,
            estimated_biomass: biomass,
        });
        crop.last_sim_date += Duration::days(1);

        // Completing the cycle harvests the crop
        if crop.days_simulated() == crop_type.days_cycle as usize {
            crop.active = false;
            info!(crop_id = %crop.id, biomass = biomass, "growth cycle complete");
        }

        self.store.save_crop(&crop)?;

        Ok(crop)
    }

    /// Get a crop by id (owner or admin)
    pub fn get_crop_by_id(&self, crop_id: Uuid, requesting_user_id: Uuid) -> AppResult<Crop> {
        self.fetch_crop_checked(crop_id, requesting_user_id)
    }

    /// Get a crop's recorded day-by-day conditions (owner or admin)
    pub fn get_crop_history(
        &self,
        crop_id: Uuid,
        requesting_user_id: Uuid,
    ) -> AppResult<Vec<DailyCondition>> {
        let crop = self.fetch_crop_checked(crop_id, requesting_user_id)?;
        Ok(crop.conditions)
    }

    /// List a user's crops (the user themselves or an admin)
    pub fn get_crops_by_user(
        &self,
        user_id: Uuid,
        requesting_user_id: Uuid,
    ) -> AppResult<Vec<Crop>> {
        let requester = self
            .store
            .get_user_by_id(requesting_user_id)?
            .ok_or(AppError::UserNotFound(requesting_user_id))?;

        if user_id != requesting_user_id && !requester.role.is_admin() {
            return Err(AppError::Unauthorized(
                "Cannot list another user's crops".to_string(),
            ));
        }

        Ok(self.store.get_crops_by_user(user_id)?)
    }

    /// Update a crop's mutable fields (owner or admin)
    ///
    /// Every field is validated before any is applied; a rejected update
    /// changes nothing.
    pub fn update_crops(
        &self,
        crop_id: Uuid,
        requesting_user_id: Uuid,
        input: UpdateCropInput,
    ) -> AppResult<Crop> {
        // Validate new name if provided
        if let Some(ref name) = input.name {
            if let Err(message) = validate_name(name) {
                return Err(AppError::validation("name", message));
            }
        }

        let mut crop = self.fetch_crop_checked(crop_id, requesting_user_id)?;

        // Completion is one-way: a crop that finished its cycle stays
        // harvested
        if input.active == Some(true) {
            let crop_type = self
                .store
                .get_crop_type_by_id(crop.crop_type_id)?
                .ok_or(AppError::CropTypeNotFound(crop.crop_type_id))?;
            if crop.days_simulated() >= crop_type.days_cycle as usize {
                return Err(AppError::validation(
                    "active",
                    "A completed crop cannot be reactivated",
                ));
            }
        }

        if let Some(name) = input.name {
            crop.name = name;
        }
        if let Some(active) = input.active {
            crop.active = active;
        }
        self.store.save_crop(&crop)?;

        info!(crop_id = %crop.id, "crop updated");
        Ok(crop)
    }

    /// Delete a crop (owner or admin)
    pub fn delete_crop(&self, crop_id: Uuid, requesting_user_id: Uuid) -> AppResult<()> {
        let crop = self.fetch_crop_checked(crop_id, requesting_user_id)?;

        // De-register from the owner first, then drop the record. These are
        // two separate writes: a crash in between leaves the crop present
        // but unlisted.
        if let Some(mut owner) = self.store.get_user_by_id(crop.user_id)? {
            if owner.crop_ids.contains(&crop.id) {
                owner.crop_ids.retain(|id| *id != crop.id);
                self.store.save_user(&owner)?;
            }
        }
        self.store.delete_crop(crop_id)?;

        info!(crop_id = %crop_id, requested_by = %requesting_user_id, "crop deleted");
        Ok(())
    }

    /// Aggregate statistics over a crop's recorded days (owner or admin)
    ///
    /// With zero recorded days every aggregate is zero.
    pub fn get_crop_statistics(
        &self,
        crop_id: Uuid,
        requesting_user_id: Uuid,
    ) -> AppResult<CropStatistics> {
        let crop = self.fetch_crop_checked(crop_id, requesting_user_id)?;
        let crop_type = self
            .store
            .get_crop_type_by_id(crop.crop_type_id)?
            .ok_or(AppError::CropTypeNotFound(crop.crop_type_id))?;

        let days_recorded = crop.days_simulated();
        if days_recorded == 0 {
            return Ok(CropStatistics {
                crop_id,
                days_recorded: 0,
                average_temperature: 0.0,
                average_rain: 0.0,
                average_sun_hours: 0.0,
                total_growth: 0.0,
                stress_days: 0,
                performance_ratio: 0.0,
            });
        }

        let count = days_recorded as f64;
        let average_temperature =
            crop.conditions.iter().map(|c| c.temperature).sum::<f64>() / count;
        let average_rain = crop.conditions.iter().map(|c| c.rain).sum::<f64>() / count;
        let average_sun_hours = crop.conditions.iter().map(|c| c.sun_hours).sum::<f64>() / count;

        // A day counts as stressed when its temperature lands strictly
        // outside the comfort band around the optimum
        let lower = 0.8 * crop_type.optimal_temp;
        let upper = 1.2 * crop_type.optimal_temp;
        let stress_days = crop
            .conditions
            .iter()
            .filter(|c| c.temperature < lower || c.temperature > upper)
            .count();

        let final_biomass = engine::current_biomass(&crop, &crop_type);

        Ok(CropStatistics {
            crop_id,
            days_recorded,
            average_temperature,
            average_rain,
            average_sun_hours,
            total_growth: final_biomass - crop_type.initial_biomass,
            stress_days,
            performance_ratio: final_biomass / crop_type.potential_performance,
        })
    }

    /// Fetch a crop after checking that the requester may access it: the
    /// requesting user must exist and be the crop's owner or an admin.
    fn fetch_crop_checked(&self, crop_id: Uuid, requesting_user_id: Uuid) -> AppResult<Crop> {
        let requester = self
            .store
            .get_user_by_id(requesting_user_id)?
            .ok_or(AppError::UserNotFound(requesting_user_id))?;

        let crop = self
            .store
            .get_crop_by_id(crop_id)?
            .ok_or(AppError::CropNotFound(crop_id))?;

        if crop.user_id != requesting_user_id && !requester.role.is_admin() {
            return Err(AppError::Ownership {
                user_id: requesting_user_id,
                crop_id,
            });
        }

        Ok(crop)
    }
}
