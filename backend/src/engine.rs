//! Growth simulation engine
//!
//! Pure, stateless functions that turn one day of weather into biomass gain.
//! Each factor lands in [0, 1]; the daily gain is a fixed fraction of the
//! crop type's potential, damped by the combined factor raised to a fixed
//! exponent so that poor conditions hurt more than proportionally.

use shared::{Crop, CropType};

/// Fraction of `potential_performance` a crop can gain on a perfect day.
pub const BASE_GROWTH_RATE: f64 = 0.05;

/// Exponent applied to the combined factor; values below 1.0 are pushed
/// further down, so a mediocre day yields less than a mediocre fraction.
pub const GROWTH_EXPONENT: f64 = 1.5;

/// Phase breakpoints of the growth cycle (fractions of `days_cycle`).
const EARLY_PHASE_END: f64 = 0.2;
const LATE_PHASE_START: f64 = 0.7;
const LATE_PHASE_FLOOR: f64 = 0.2;

/// How favorable today's weather is for this crop type, in [0, 1].
///
/// The temperature term falls off linearly with the relative distance from
/// `optimal_temp` (zero at twice the optimum away); the rain and sunlight
/// terms are satisfaction ratios capped at 1. A crop type that needs no
/// water or no light treats that term as fully satisfied.
pub fn environment_factor(crop_type: &CropType, temperature: f64, rain: f64, sun_hours: f64) -> f64 {
    let temp_factor =
        (1.0 - (temperature - crop_type.optimal_temp).abs() / crop_type.optimal_temp * 0.5).max(0.0);

    let water_factor = if crop_type.needed_water > 0.0 {
        (rain / crop_type.needed_water).min(1.0)
    } else {
        1.0
    };

    let light_factor = if crop_type.needed_light > 0.0 {
        (sun_hours / crop_type.needed_light).min(1.0)
    } else {
        1.0
    };

    temp_factor * water_factor * light_factor
}

/// Growth-phase multiplier for the day about to be simulated.
///
/// `phase` is the position of that day within the cycle, in (0, 1]:
/// establishment ramps from 0.5 up to 1.0 over the first 20% of the cycle,
/// the vegetative middle runs at full speed, and maturation decays linearly
/// down to a floor of 0.2.
pub fn phase_factor(crop: &Crop, crop_type: &CropType) -> f64 {
    let phase = (crop.conditions.len() as f64 + 1.0) / crop_type.days_cycle as f64;

    if phase < EARLY_PHASE_END {
        0.5 + phase * 2.5
    } else if phase < LATE_PHASE_START {
        1.0
    } else {
        (1.5 - phase).max(LATE_PHASE_FLOOR)
    }
}

/// Remaining headroom toward `potential_performance`, in [0, 1].
///
/// Approaching the ceiling slows growth smoothly; the factor is floored at
/// zero so a crop already at (or numerically past) its potential stops.
pub fn capacity_factor(crop: &Crop, crop_type: &CropType) -> f64 {
    let current = current_biomass(crop, crop_type);
    ((crop_type.potential_performance - current) / crop_type.potential_performance).max(0.0)
}

/// Biomass the crop carries into the next simulated day: the last recorded
/// estimate, or the type's `initial_biomass` before any day was simulated.
pub fn current_biomass(crop: &Crop, crop_type: &CropType) -> f64 {
    crop.latest_biomass().unwrap_or(crop_type.initial_biomass)
}

/// Biomass gained over one day given the three factors.
pub fn daily_growth(crop_type: &CropType, environment: f64, phase: f64, capacity: f64) -> f64 {
    crop_type.potential_performance
        * BASE_GROWTH_RATE
        * (environment * phase * capacity).powf(GROWTH_EXPONENT)
}

/// Clamp the accumulated biomass to the crop type's ceiling. The capacity
/// factor already brakes near the top; this keeps the invariant exact.
pub fn next_biomass(current: f64, growth: f64, crop_type: &CropType) -> f64 {
    (current + growth).min(crop_type.potential_performance)
}
