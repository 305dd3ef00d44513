//! Persistence contract for user records.

use async_trait::async_trait;
use service_core::error::AppError;

use crate::models::User;

/// Storage for [`User`] records.
///
/// Implementations enforce uniqueness of `email` and `keycloak_id` themselves
/// and report a violation from [`UserStore::insert`] as [`AppError::Conflict`].
/// Email arguments are expected in normalized (lowercased) form.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user by primary key.
    async fn insert(&self, user: &User) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_keycloak_id(&self, keycloak_id: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    async fn exists_by_keycloak_id(&self, keycloak_id: &str) -> Result<bool, AppError>;

    /// Health check - ping the backing store.
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Conflict raised when `email` is already taken.
pub(crate) fn email_taken() -> AppError {
    AppError::Conflict(anyhow::anyhow!("Email already registered"))
}

/// Conflict raised when `keycloak_id` is already taken.
pub(crate) fn keycloak_id_taken() -> AppError {
    AppError::Conflict(anyhow::anyhow!("keycloakId already registered"))
}
