//! Crop species templates

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-defined species template
///
/// Immutable once created: crops hold a reference to their type for the whole
/// cycle, so there is no update operation anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropType {
    pub id: Uuid,
    pub name: String,
    /// Optimal growing temperature in °C
    pub optimal_temp: f64,
    /// Water requirement in mm per day
    pub needed_water: f64,
    /// Light requirement in hours per day
    pub needed_light: f64,
    /// Length of the full growth cycle in simulated days
    pub days_cycle: u32,
    /// Biomass at planting in g/m²
    pub initial_biomass: f64,
    /// Biomass ceiling the species can reach in g/m²
    pub potential_performance: f64,
}
