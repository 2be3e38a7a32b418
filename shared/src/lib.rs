//! Shared domain types for CultivaLab
//!
//! This crate contains the passive records the growth engine, services and
//! storage layer all operate on, plus the pure validation helpers used at
//! service boundaries.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
