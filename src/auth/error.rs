// Authentication and authorization error types

use crate::auth::permissions::{Action, Resource};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

/// Generic message returned for every authentication failure.
/// The specific reason (missing header, bad signature, stale id, unverified
/// email) stays in the server log and is never surfaced to the caller.
const GENERIC_AUTH_MESSAGE: &str = "Invalid or missing authentication token";

/// Authentication and authorization error types
#[derive(Debug)]
pub enum AuthError {
    // Authentication errors
    ValidationError(String),
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    ExpiredToken,
    /// Token decoded but the user id no longer exists
    UserNotFound,
    /// Structurally valid token for an account that has not verified its email
    EmailNotVerified,
    EmailAlreadyExists,
    EmailAlreadyVerified,
    InvalidVerificationCode,
    DatabaseError(String),
    PasswordHashError,
    TokenGenerationError(String),
    ConfigError(String),

    // Authorization errors
    /// User's role grants no permission for the (resource, action) pair
    Forbidden { resource: Resource, action: Action },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::MissingToken => write!(f, "Token not found"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::EmailNotVerified => write!(f, "Email not verified"),
            AuthError::EmailAlreadyExists => write!(f, "Email already exists"),
            AuthError::EmailAlreadyVerified => write!(f, "Email is already verified"),
            AuthError::InvalidVerificationCode => {
                write!(f, "Invalid or expired verification code")
            }
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
            AuthError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AuthError::Forbidden { resource, action } => {
                write!(f, "No permission for {} on {}", action, resource)
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::InvalidCredentials => {
                warn!("Login attempt with invalid credentials");
                (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
            }
            // All token/identity failures collapse to one generic 401.
            // The real reason is logged here and discarded.
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::UserNotFound
            | AuthError::EmailNotVerified => {
                warn!("Authentication failed: {}", self);
                (StatusCode::UNAUTHORIZED, GENERIC_AUTH_MESSAGE.to_string())
            }
            AuthError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Email already exists".to_string())
            }
            AuthError::EmailAlreadyVerified => {
                (StatusCode::CONFLICT, "Email is already verified".to_string())
            }
            AuthError::InvalidVerificationCode => (
                StatusCode::BAD_REQUEST,
                "Invalid or expired verification code".to_string(),
            ),
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::ConfigError(msg) => {
                error!("Auth configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::Forbidden { resource, action } => {
                warn!("Authorization failed: {} on {}", action, resource);
                (StatusCode::FORBIDDEN, "Insufficient permissions".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::EmailNotVerified => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::EmailAlreadyVerified => StatusCode::CONFLICT,
            AuthError::InvalidVerificationCode => StatusCode::BAD_REQUEST,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    /// Client-facing message for this error (no sensitive data)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::UserNotFound
            | AuthError::EmailNotVerified => GENERIC_AUTH_MESSAGE.to_string(),
            AuthError::EmailAlreadyExists => "Email already exists".to_string(),
            AuthError::EmailAlreadyVerified => "Email is already verified".to_string(),
            AuthError::InvalidVerificationCode => {
                "Invalid or expired verification code".to_string()
            }
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_)
            | AuthError::ConfigError(_) => "Internal server error".to_string(),
            AuthError::Forbidden { .. } => "Insufficient permissions".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures_collapse_to_one_message() {
        let failures = [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::UserNotFound,
            AuthError::EmailNotVerified,
        ];

        for failure in failures {
            assert_eq!(failure.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(failure.error_message(), GENERIC_AUTH_MESSAGE);
        }
    }

    #[test]
    fn test_forbidden_is_403_not_401() {
        let err = AuthError::Forbidden {
            resource: Resource::Product,
            action: Action::Delete,
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = AuthError::DatabaseError("connection refused to 10.0.0.3".to_string());
        assert_eq!(err.error_message(), "Internal server error");
    }
}
