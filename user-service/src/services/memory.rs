//! In-process user store for tests and local runs without PostgreSQL.

use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{email_taken, keycloak_id_taken, UserStore};
use crate::models::User;

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    id_by_email: HashMap<String, String>,
    id_by_keycloak_id: HashMap<String, String>,
}

/// Map-backed store. Uniqueness checks and the insert share one write lock,
/// so racing registrations for the same email resolve to one winner.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(&user.id) {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "User '{}' already exists",
                user.id
            )));
        }
        if tables.id_by_email.contains_key(&user.email) {
            return Err(email_taken());
        }
        if tables.id_by_keycloak_id.contains_key(&user.keycloak_id) {
            return Err(keycloak_id_taken());
        }

        tables
            .id_by_email
            .insert(user.email.clone(), user.id.clone());
        tables
            .id_by_keycloak_id
            .insert(user.keycloak_id.clone(), user.id.clone());
        tables.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .id_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_keycloak_id(&self, keycloak_id: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .id_by_keycloak_id
            .get(keycloak_id)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.tables.read().await.id_by_email.contains_key(email))
    }

    async fn exists_by_keycloak_id(&self, keycloak_id: &str) -> Result<bool, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .id_by_keycloak_id
            .contains_key(keycloak_id))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
