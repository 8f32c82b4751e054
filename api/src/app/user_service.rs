//! User service
//!
//! Back-office accounts: password login, API key issuance and admin management.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewUser, Role, User, UserChanges, UserId};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// Shortest accepted login
pub const MIN_LOGIN_LEN: usize = 2;
/// Longest accepted login
pub const MAX_LOGIN_LEN: usize = 180;
/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 2;
/// Longest accepted password
pub const MAX_PASSWORD_LEN: usize = 255;

/// Hash used when the login is unknown, so a miss costs as much as a hit
const DUMMY_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    bcrypt_cost: u32,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Create a user with a hashed password
    pub async fn create(
        &self,
        login: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<User, AppError> {
        validate_login(login)?;
        validate_password(password)?;

        if self.users.find_by_login(login).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with login '{}' already exists",
                login
            ))));
        }

        let roles = if roles.is_empty() {
            vec![Role::Gamemaster]
        } else {
            roles
        };

        let user = self
            .users
            .create(&NewUser {
                login: login.to_string(),
                password_hash: self.hash_password(password).await?,
                roles,
            })
            .await?;

        tracing::info!(user_id = %user.id, login = %user.login, "User created");
        Ok(user)
    }

    /// Check credentials and issue a fresh API key
    ///
    /// Returns (user, api_key). The key is only shown once; the previous key
    /// of the user stops working.
    pub async fn login(&self, login: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self.users.find_by_login(login).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password = password.to_string();
        // A malformed stored hash counts as a failed attempt
        let valid = tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).unwrap_or(false)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))?;

        let user = match user {
            Some(user) if valid => user,
            _ => {
                tracing::warn!(login = %login, "Failed login attempt");
                return Err(AppError::Domain(DomainError::Unauthorized(
                    "Invalid credentials".to_string(),
                )));
            }
        };

        let api_key = generate_api_key();
        self.users
            .update_api_key_hash(&user.id, &hash_api_key(&api_key))
            .await?;

        tracing::debug!(user_id = %user.id, "API key issued");
        Ok((user, api_key))
    }

    /// Find a user by the hash of their API key
    pub async fn find_by_api_key(&self, api_key_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(api_key_hash).await?)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn get(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Update login, password and/or roles
    pub async fn update(
        &self,
        id: &UserId,
        login: Option<&str>,
        password: Option<&str>,
        roles: Option<Vec<Role>>,
    ) -> Result<User, AppError> {
        let current = self.get(id).await?;

        if let Some(login) = login {
            validate_login(login)?;
            if login != current.login && self.users.find_by_login(login).await?.is_some() {
                return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                    "User with login '{}' already exists",
                    login
                ))));
            }
        }

        let password_hash = match password {
            Some(password) => {
                validate_password(password)?;
                Some(self.hash_password(password).await?)
            }
            None => None,
        };

        if matches!(&roles, Some(r) if r.is_empty()) {
            return Err(AppError::BadRequest(
                "A user needs at least one role".to_string(),
            ));
        }

        let changes = UserChanges {
            login: login.map(str::to_string),
            password_hash,
            roles,
        };

        Ok(self.users.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: &UserId) -> Result<(), AppError> {
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Create the configured admin account unless the login is already taken
    pub async fn ensure_bootstrap_admin(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        if self.users.find_by_login(login).await?.is_some() {
            tracing::debug!(login = %login, "Bootstrap admin already present");
            return Ok(None);
        }

        let admin = self.create(login, password, vec![Role::Admin]).await?;
        tracing::info!(login = %login, "Bootstrap admin created");
        Ok(Some(admin))
    }

    /// bcrypt is CPU-bound; runs on the blocking pool
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }
}

fn validate_login(login: &str) -> Result<(), AppError> {
    let len = login.trim().chars().count();
    if !(MIN_LOGIN_LEN..=MAX_LOGIN_LEN).contains(&len) {
        return Err(AppError::BadRequest(format!(
            "Login must be between {} and {} characters",
            MIN_LOGIN_LEN, MAX_LOGIN_LEN
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::BadRequest(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("sk-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
