//! User account and role models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role on the platform
///
/// Exactly one `Admin` account may exist system-wide; registration enforces
/// this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Opaque hash produced by the credential primitive; never a plain password
    pub password_hash: String,
    pub role: UserRole,
    /// Ids of crops created by this user. Informational back-references only:
    /// ownership checks always go through `Crop::user_id`.
    pub crop_ids: Vec<Uuid>,
}
