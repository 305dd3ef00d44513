use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::User;

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 320, message = "Email must be between 1 and 320 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    #[validate(
        custom(function = "non_blank", message = "keycloakId is required"),
        length(max = 255, message = "keycloakId is too long")
    )]
    pub keycloak_id: String,

    #[validate(length(min = 6, message = "Password must have at least 6 characters"))]
    #[serde(default)]
    pub password: Option<String>,

    #[validate(length(max = 100, message = "First name is too long"))]
    #[serde(default)]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name is too long"))]
    #[serde(default)]
    pub last_name: Option<String>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Public profile; the password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub keycloak_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            keycloak_id: u.keycloak_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, keycloak_id: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            keycloak_id: keycloak_id.to_string(),
            password: None,
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn accepts_valid_request() {
        assert!(request("runner@example.com", "kc-1").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = request("not-an-email", "kc-1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn rejects_blank_email() {
        let errors = request("", "kc-1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn rejects_blank_keycloak_id() {
        let errors = request("runner@example.com", "   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("keycloak_id"));
    }

    #[test]
    fn rejects_oversized_keycloak_id() {
        let errors = request("runner@example.com", &"k".repeat(256))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("keycloak_id"));
        assert!(request("runner@example.com", &"k".repeat(255)).validate().is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let mut req = request("runner@example.com", "kc-1");
        req.password = Some("12345".to_string());
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"runner@example.com","keycloakId":"kc-1","firstName":"Ada"}"#,
        )
        .unwrap();
        assert_eq!(req.keycloak_id, "kc-1");
        assert_eq!(req.first_name.as_deref(), Some("Ada"));
        assert!(req.password.is_none());
    }

    #[test]
    fn response_omits_password_hash() {
        let user = User::new(
            "kc-1".to_string(),
            "runner@example.com".to_string(),
            Some("$argon2id$secret".to_string()),
            None,
            None,
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["keycloakId"], "kc-1");
    }
}
