//! User model - identity records keyed by an internal id and a Keycloak subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

/// User entity. Created once at registration, never mutated afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub keycloak_id: String,
    pub email: String,
    /// Argon2id PHC string; never leaves the service.
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh internal id and the default role.
    pub fn new(
        keycloak_id: String,
        email: String,
        password_hash: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            keycloak_id,
            email: normalize_email(&email),
            password_hash,
            first_name,
            last_name,
            role: UserRole::User.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Emails are stored and looked up lowercased so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_uuid_and_default_role() {
        let user = User::new(
            "kc-1".to_string(),
            "Ada@Example.com".to_string(),
            None,
            Some("Ada".to_string()),
            None,
        );

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, "USER");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn role_codes_match_wire_format() {
        assert_eq!(UserRole::User.as_str(), "USER");
        assert_eq!(UserRole::Admin.as_str(), "ADMIN");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), r#""ADMIN""#);
        let parsed: UserRole = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.COM\n"), "ada@example.com");
    }
}
