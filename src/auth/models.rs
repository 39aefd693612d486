// Authentication data models and DTOs

use crate::auth::permissions::Permission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub role_id: i32,
    pub is_email_verified: bool,
    pub verification_code_hash: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Role database model
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
}

/// A user together with the role name and permission list the role grants
/// This is what the request extractor loads per request.
#[derive(Debug, Clone)]
pub struct UserAccess {
    pub user: User,
    pub role: String,
    pub permissions: Vec<Permission>,
}

/// User response model (excludes credentials and OTP state)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub permissions: Vec<Permission>,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccess {
    pub fn into_response(self) -> UserResponse {
        UserResponse {
            id: self.user.id,
            email: self.user.email,
            display_name: self.user.display_name,
            phone: self.user.phone,
            role: self.role,
            permissions: self.permissions,
            is_email_verified: self.user.is_email_verified,
            created_at: self.user.created_at,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(custom = "crate::validation::validate_phone")]
    pub phone: Option<String>,
}

/// Email verification request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Authentication response DTO
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "rider@example.com".to_string(),
            password: "long enough".to_string(),
            display_name: "Rider".to_string(),
            phone: Some("+212612345678".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "long enough".to_string(),
            display_name: "Rider".to_string(),
            phone: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "rider@example.com".to_string(),
            password: "short".to_string(),
            display_name: "Rider".to_string(),
            phone: None,
        };
        assert!(short_password.validate().is_err());

        let bad_phone = RegisterRequest {
            email: "rider@example.com".to_string(),
            password: "long enough".to_string(),
            display_name: "Rider".to_string(),
            phone: Some("abc".to_string()),
        };
        assert!(bad_phone.validate().is_err());
    }

    #[test]
    fn test_verify_request_requires_six_digit_code() {
        let valid = VerifyEmailRequest {
            email: "rider@example.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short = VerifyEmailRequest {
            email: "rider@example.com".to_string(),
            code: "123".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_user_response_has_no_credentials() {
        let response = UserResponse {
            id: 1,
            email: "rider@example.com".to_string(),
            display_name: "Rider".to_string(),
            phone: None,
            role: "customer".to_string(),
            permissions: vec![],
            is_email_verified: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("verification_code"));
        assert!(json.contains("\"role\":\"customer\""));
    }
}
