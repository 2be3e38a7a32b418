//! Error handling for the CultivaLab simulation engine
//!
//! Every fallible operation reports through [`AppError`]; callers embedding
//! the library map these onto their own surface (HTTP, CLI, ...).

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Not-found errors (each carries the offending id)
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Crop not found: {0}")]
    CropNotFound(Uuid),

    #[error("Crop type not found: {0}")]
    CropTypeNotFound(Uuid),

    #[error("No user with username: {0}")]
    UsernameNotFound(String),

    #[error("No crop type named: {0}")]
    CropTypeNameNotFound(String),

    // Conflict errors
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Crop type already exists: {0}")]
    CropTypeExists(String),

    #[error("An admin account already exists")]
    AdminAlreadyExists,

    // Validation errors
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    // Authorization errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid admin signup key")]
    InvalidAdminKey,

    #[error("User {user_id} does not own crop {crop_id}")]
    Ownership { user_id: Uuid, crop_id: Uuid },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a [`AppError::Validation`] on a named field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for service operations
pub type AppResult<T> = Result<T, AppError>;
