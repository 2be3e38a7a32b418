//! Simulated day records

use serde::{Deserialize, Serialize};

/// One simulated day of a crop: the weather that was fed in and the biomass
/// estimate after applying it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyCondition {
    /// 1-based position within the cycle; consecutive, no gaps
    pub day: u32,
    /// Mean temperature of the day in °C
    pub temperature: f64,
    /// Rainfall in mm
    pub rain: f64,
    /// Sunlight in hours
    pub sun_hours: f64,
    /// Cumulative biomass after this day in g/m²; never decreases across the
    /// sequence and never exceeds the type's `potential_performance`
    pub estimated_biomass: f64,
}
