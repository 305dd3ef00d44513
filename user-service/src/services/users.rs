//! Registration, profile retrieval and existence checks.

use metrics::counter;
use service_core::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::store::UserStore;
use crate::dtos::{RegisterRequest, UserResponse};
use crate::models::{normalize_email, User};
use crate::utils::{hash_password, Password};

/// User directory operations over an injected [`UserStore`].
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Register a new user.
    ///
    /// The email is normalized, then the request is validated before the
    /// store is touched. Email and subject id uniqueness is enforced by the
    /// store's insert.
    #[instrument(skip(self, request), fields(keycloak_id = %request.keycloak_id))]
    pub async fn register(&self, mut request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let password_hash = match request.password {
            Some(password) => {
                let password = Password::new(password);
                let hash = tokio::task::spawn_blocking(move || hash_password(&password))
                    .await
                    .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))??;
                Some(hash)
            }
            None => None,
        };

        let user = User::new(
            request.keycloak_id,
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
        );

        if let Err(e) = self.store.insert(&user).await {
            if matches!(e, AppError::Conflict(_)) {
                info!(reason = %e, "Registration rejected");
            }
            return Err(e);
        }

        counter!("users_registered_total").increment(1);
        info!(user_id = %user.id, "User registered");

        Ok(UserResponse::from(user))
    }

    /// Fetch the public profile by internal id.
    #[instrument(skip(self))]
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserResponse, AppError> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))
    }

    /// Whether a user with this identity-provider subject id exists.
    #[instrument(skip(self))]
    pub async fn exist_by_user_id(&self, keycloak_id: &str) -> Result<bool, AppError> {
        self.store.exists_by_keycloak_id(keycloak_id).await
    }
}
