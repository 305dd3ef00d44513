//! PostgreSQL store tests.
//!
//! These need a reachable database; they are skipped when `DATABASE_URL`
//! is not set. Run with: DATABASE_URL=postgres://... cargo test -p user-service --test postgres_store_test

use secrecy::Secret;
use service_core::error::AppError;
use user_service::config::DatabaseConfig;
use user_service::models::User;
use user_service::services::{PgUserStore, UserStore};
use uuid::Uuid;

async fn store() -> Option<PgUserStore> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL is not set");
        return None;
    };

    let store = PgUserStore::connect(&DatabaseConfig {
        url: Secret::new(url),
        max_connections: 5,
        min_connections: 1,
    })
    .await
    .expect("Failed to connect to PostgreSQL");
    store.run_migrations().await.expect("Failed to migrate");
    Some(store)
}

fn unique_user() -> User {
    let tag = Uuid::new_v4().simple().to_string();
    User::new(
        format!("kc-{}", tag),
        format!("user-{}@example.com", tag),
        None,
        Some("Test".to_string()),
        None,
    )
}

#[tokio::test]
async fn insert_and_lookup() {
    let Some(store) = store().await else { return };
    let user = unique_user();

    store.insert(&user).await.unwrap();

    let by_id = store.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, user.email);
    assert_eq!(by_id.first_name.as_deref(), Some("Test"));

    let by_email = store.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_subject = store
        .find_by_keycloak_id(&user.keycloak_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_subject.id, user.id);

    assert!(store.exists_by_email(&user.email).await.unwrap());
    assert!(store.exists_by_keycloak_id(&user.keycloak_id).await.unwrap());
}

#[tokio::test]
async fn unknown_keys_are_absent() {
    let Some(store) = store().await else { return };
    let ghost = Uuid::new_v4().to_string();

    assert!(store.find_by_id(&ghost).await.unwrap().is_none());
    assert!(!store.exists_by_keycloak_id(&ghost).await.unwrap());
    assert!(!store
        .exists_by_email(&format!("{}@example.com", ghost))
        .await
        .unwrap());
}

#[tokio::test]
async fn unique_constraints_surface_as_conflicts() {
    let Some(store) = store().await else { return };
    let user = unique_user();
    store.insert(&user).await.unwrap();

    let mut same_email = unique_user();
    same_email.email = user.email.clone();
    let err = store.insert(&same_email).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("Email"));

    let mut same_subject = unique_user();
    same_subject.keycloak_id = user.keycloak_id.clone();
    let err = store.insert(&same_subject).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("keycloakId"));
}

#[tokio::test]
async fn health_check_pings_database() {
    let Some(store) = store().await else { return };
    store.health_check().await.unwrap();
}

#[tokio::test]
async fn stores_over_one_pool_see_the_same_rows() {
    let Some(store) = store().await else { return };
    let shared = PgUserStore::new(store.pool().clone());
    let user = unique_user();

    store.insert(&user).await.unwrap();

    assert!(shared.exists_by_keycloak_id(&user.keycloak_id).await.unwrap());
    shared.health_check().await.unwrap();
}
