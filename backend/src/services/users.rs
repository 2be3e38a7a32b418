//! User account service for registration, login, and profile management

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::storage::Storage;
use shared::{validate_password, validate_username, User, UserRole};

/// User account service
///
/// Registration of the single admin account is gated by a signup key taken
/// from configuration; while no key is configured, admin registration is
/// rejected outright.
pub struct UserService<S: Storage> {
    store: Arc<S>,
    admin_signup_key: Option<String>,
}

impl<S: Storage> UserService<S> {
    /// Create a new UserService instance
    pub fn new(store: Arc<S>, admin_signup_key: Option<String>) -> Self {
        Self {
            store,
            admin_signup_key,
        }
    }

    /// Register a new user account
    pub fn register(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
        admin_signup_key: Option<&str>,
    ) -> AppResult<User> {
        // Validate input shape
        if let Err(message) = validate_username(username) {
            return Err(AppError::validation("username", message));
        }
        if let Err(message) = validate_password(password) {
            return Err(AppError::validation("password", message));
        }

        // Check for duplicate username
        if self.store.get_user_by_username(username)?.is_some() {
            return Err(AppError::UsernameTaken(username.to_string()));
        }

        // Admin registration requires the configured signup key, and only
        // one admin account may exist
        if role == UserRole::Admin {
            let configured = self
                .admin_signup_key
                .as_deref()
                .ok_or(AppError::InvalidAdminKey)?;
            if admin_signup_key != Some(configured) {
                warn!(username = %username, "admin registration with bad signup key");
                return Err(AppError::InvalidAdminKey);
            }
            let has_admin = self.store.get_users()?.iter().any(|u| u.role.is_admin());
            if has_admin {
                return Err(AppError::AdminAlreadyExists);
            }
        }

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            role,
            crop_ids: vec![],
        };
        self.store.save_user(&user)?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Authenticate a user with username and password
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller.
    pub fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .store
            .get_user_by_username(username)?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            warn!(username = %username, "failed login attempt");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get a user by id
    pub fn get_user_by_id(&self, user_id: Uuid) -> AppResult<User> {
        self.store
            .get_user_by_id(user_id)?
            .ok_or(AppError::UserNotFound(user_id))
    }

    /// Get a user by username
    pub fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.store
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UsernameNotFound(username.to_string()))
    }

    /// Change a user's username
    pub fn update_username(&self, user_id: Uuid, new_username: &str) -> AppResult<User> {
        if let Err(message) = validate_username(new_username) {
            return Err(AppError::validation("username", message));
        }

        let mut user = self
            .store
            .get_user_by_id(user_id)?
            .ok_or(AppError::UserNotFound(user_id))?;

        // Renaming to the current name is rejected rather than silently
        // ignored
        if user.username == new_username {
            return Err(AppError::validation(
                "username",
                "New username is the same as the current one",
            ));
        }

        if self.store.get_user_by_username(new_username)?.is_some() {
            return Err(AppError::UsernameTaken(new_username.to_string()));
        }

        user.username = new_username.to_string();
        self.store.save_user(&user)?;

        info!(user_id = %user.id, username = %user.username, "username changed");
        Ok(user)
    }

    /// Delete a user account
    ///
    /// Only the user themselves or an admin may delete an account. The
    /// user's crops are left in place; their `user_id` then dangles.
    pub fn delete_user(&self, user_id: Uuid, requesting_user_id: Uuid) -> AppResult<()> {
        let requester = self
            .store
            .get_user_by_id(requesting_user_id)?
            .ok_or(AppError::UserNotFound(requesting_user_id))?;

        if self.store.get_user_by_id(user_id)?.is_none() {
            return Err(AppError::UserNotFound(user_id));
        }

        if requesting_user_id != user_id && !requester.role.is_admin() {
            return Err(AppError::Unauthorized(
                "Only the account owner or an admin can delete a user".to_string(),
            ));
        }

        self.store.delete_user(user_id)?;

        info!(user_id = %user_id, requested_by = %requesting_user_id, "user deleted");
        Ok(())
    }
}
