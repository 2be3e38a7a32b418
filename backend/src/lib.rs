//! CultivaLab backend
//!
//! A crop lifecycle and growth simulation library: admins define crop type
//! templates, users plant crops and feed them one day of weather at a time,
//! and the engine turns each day into a biomass estimate until the growth
//! cycle completes. All state lives in a single JSON database file.
//!
//! Everything is synchronous call-and-return. The storage layer performs no
//! locking: callers that may operate on the same record concurrently must
//! serialize access themselves (one writer per record), otherwise the later
//! write silently wins.

pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{CropService, CropTypeService, UserService};
pub use storage::{JsonStorage, Storage};
