//! File-backed JSON storage
//!
//! The whole database is one JSON document with a `users`, a `crops` and a
//! `crop_types` array. Every read deserializes the full document and every
//! write serializes and rewrites it, so records never partially change on
//! disk. There is no file locking and no isolation: callers that may touch
//! the same record concurrently must serialize access themselves, otherwise
//! the later write silently wins.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shared::{Crop, CropType, User};
use tracing::debug;
use uuid::Uuid;

use super::{Storage, StoreResult};

/// The persisted document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    users: Vec<User>,
    crops: Vec<Crop>,
    crop_types: Vec<CropType>,
}

/// JSON-file storage adapter.
///
/// A missing file reads as the empty database; the file is created on the
/// first write (parent directories included).
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Create a storage handle for the given database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> StoreResult<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&self, document: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "database file rewritten");
        Ok(())
    }
}

impl Storage for JsonStorage {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn get_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.read()?.users)
    }

    fn get_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.into_iter().find(|u| u.id == user_id))
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .into_iter()
            .find(|u| u.username == username))
    }

    fn save_user(&self, user: &User) -> StoreResult<()> {
        let mut document = self.read()?;
        match document.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => *slot = user.clone(),
            None => document.users.push(user.clone()),
        }
        self.write(&document)
    }

    fn delete_user(&self, user_id: Uuid) -> StoreResult<()> {
        let mut document = self.read()?;
        document.users.retain(|u| u.id != user_id);
        self.write(&document)
    }

    // =========================================================================
    // Crop Operations
    // =========================================================================

    fn get_crops(&self) -> StoreResult<Vec<Crop>> {
        Ok(self.read()?.crops)
    }

    fn get_crop_by_id(&self, crop_id: Uuid) -> StoreResult<Option<Crop>> {
        Ok(self.read()?.crops.into_iter().find(|c| c.id == crop_id))
    }

    fn get_crops_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Crop>> {
        let mut crops = self.read()?.crops;
        crops.retain(|c| c.user_id == user_id);
        Ok(crops)
    }

    fn get_crops_by_type(&self, crop_type_id: Uuid) -> StoreResult<Vec<Crop>> {
        let mut crops = self.read()?.crops;
        crops.retain(|c| c.crop_type_id == crop_type_id);
        Ok(crops)
    }

    fn get_active_crops(&self) -> StoreResult<Vec<Crop>> {
        let mut crops = self.read()?.crops;
        crops.retain(|c| c.active);
        Ok(crops)
    }

    fn save_crop(&self, crop: &Crop) -> StoreResult<()> {
        let mut document = self.read()?;
        match document.crops.iter_mut().find(|c| c.id == crop.id) {
            Some(slot) => *slot = crop.clone(),
            None => document.crops.push(crop.clone()),
        }
        self.write(&document)
    }

    fn delete_crop(&self, crop_id: Uuid) -> StoreResult<()> {
        let mut document = self.read()?;
        document.crops.retain(|c| c.id != crop_id);
        self.write(&document)
    }

    // =========================================================================
    // Crop Type Operations
    // =========================================================================

    fn get_crop_types(&self) -> StoreResult<Vec<CropType>> {
        Ok(self.read()?.crop_types)
    }

    fn get_crop_type_by_id(&self, crop_type_id: Uuid) -> StoreResult<Option<CropType>> {
        Ok(self
            .read()?
            .crop_types
            .into_iter()
            .find(|t| t.id == crop_type_id))
    }

    fn get_crop_type_by_name(&self, name: &str) -> StoreResult<Option<CropType>> {
        Ok(self
            .read()?
            .crop_types
            .into_iter()
            .find(|t| t.name == name))
    }

    fn save_crop_type(&self, crop_type: &CropType) -> StoreResult<()> {
        let mut document = self.read()?;
        match document.crop_types.iter_mut().find(|t| t.id == crop_type.id) {
            Some(slot) => *slot = crop_type.clone(),
            None => document.crop_types.push(crop_type.clone()),
        }
        self.write(&document)
    }

    fn delete_crop_type(&self, crop_type_id: Uuid) -> StoreResult<()> {
        let mut document = self.read()?;
        document.crop_types.retain(|t| t.id != crop_type_id);
        self.write(&document)
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    fn clear_all_data(&self) -> StoreResult<()> {
        self.write(&Document::default())
    }
}
