//! Persistence layer for CultivaLab
//!
//! [`Storage`] abstracts the database so services can run against any
//! backing store; [`JsonStorage`] is the file-backed implementation.
//!
//! Absence is never an error here: lookups return `Ok(None)` and deletes of
//! unknown ids are no-ops. Services decide what missing records mean.

mod json;

pub use json::JsonStorage;

use shared::{Crop, CropType, User};
use thiserror::Error;
use uuid::Uuid;

/// A result type using `StoreError`.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The storage trait defining all database operations.
///
/// Every `save_*` is an upsert: a record with the same id is replaced in
/// place (its position preserved), otherwise the record is appended.
pub trait Storage: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// All user records, in stored order.
    fn get_users(&self) -> StoreResult<Vec<User>>;

    /// Look up a user by id.
    fn get_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Look up a user by username (exact match).
    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Insert or replace a user record.
    fn save_user(&self, user: &User) -> StoreResult<()>;

    /// Delete a user by id; unknown ids are a no-op.
    fn delete_user(&self, user_id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Crop Operations
    // =========================================================================

    /// All crop records, in stored order.
    fn get_crops(&self) -> StoreResult<Vec<Crop>>;

    /// Look up a crop by id.
    fn get_crop_by_id(&self, crop_id: Uuid) -> StoreResult<Option<Crop>>;

    /// All crops owned by the given user.
    fn get_crops_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Crop>>;

    /// All crops of the given crop type.
    fn get_crops_by_type(&self, crop_type_id: Uuid) -> StoreResult<Vec<Crop>>;

    /// All crops still in their growth cycle.
    fn get_active_crops(&self) -> StoreResult<Vec<Crop>>;

    /// Insert or replace a crop record.
    fn save_crop(&self, crop: &Crop) -> StoreResult<()>;

    /// Delete a crop by id; unknown ids are a no-op.
    fn delete_crop(&self, crop_id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Crop Type Operations
    // =========================================================================

    /// All crop type records, in stored order.
    fn get_crop_types(&self) -> StoreResult<Vec<CropType>>;

    /// Look up a crop type by id.
    fn get_crop_type_by_id(&self, crop_type_id: Uuid) -> StoreResult<Option<CropType>>;

    /// Look up a crop type by name (exact match).
    fn get_crop_type_by_name(&self, name: &str) -> StoreResult<Option<CropType>>;

    /// Insert or replace a crop type record.
    fn save_crop_type(&self, crop_type: &CropType) -> StoreResult<()>;

    /// Delete a crop type by id; unknown ids are a no-op.
    fn delete_crop_type(&self, crop_type_id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Drop every record of every entity.
    fn clear_all_data(&self) -> StoreResult<()>;
}
