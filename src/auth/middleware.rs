// Authentication middleware for protected routes

use crate::auth::{
    error::AuthError,
    permissions::{has_permission, Action, Permission, Resource},
    repository::UserRepository,
};
use crate::AppState;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

/// The authenticated user attached to a request, with the role name and
/// permission list loaded from the database
///
/// Extracting this performs the full authentication pipeline: bearer parse,
/// JWT verification, user load with populated permissions, verified-email
/// gate. Any failure surfaces as the uniform 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub permissions: Vec<Permission>,
}

impl CurrentUser {
    /// Whether this user's role grants the (resource, action) pair
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        has_permission(&self.permissions, resource, action)
    }

    /// Authorization gate: error when the pair is not granted
    /// Every admin mutation handler calls this before touching a repository.
    pub fn require(&self, resource: Resource, action: Action) -> Result<(), AuthError> {
        if self.can(resource, action) {
            Ok(())
        } else {
            warn!(
                "User {} (role {}) denied {} on {}",
                self.id, self.role, action, resource
            );
            Err(AuthError::Forbidden { resource, action })
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let state = AppState::from_ref(state);
        let claims = state.auth.validate_token(token)?;

        // Load the user fresh with role and permissions populated; the role
        // claim in the token is informational only
        let access = UserRepository::new(state.db.clone())
            .load_access(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !access.user.is_email_verified {
            return Err(AuthError::EmailNotVerified);
        }

        debug!(
            "Authenticated user {} ({}) for {}",
            access.user.id,
            access.role,
            parts.uri.path()
        );

        Ok(CurrentUser {
            id: access.user.id,
            email: access.user.email,
            display_name: access.user.display_name,
            role: access.role,
            permissions: access.permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn customer_with(permissions: Vec<Permission>) -> CurrentUser {
        CurrentUser {
            id: 7,
            email: "rider@example.com".to_string(),
            display_name: "Rider".to_string(),
            role: "customer".to_string(),
            permissions,
        }
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_missing_token() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers).unwrap_err(),
            AuthError::MissingToken
        ));
    }

    #[test]
    fn test_non_bearer_schemes_are_invalid() {
        for value in ["Basic dXNlcjpwYXNz", "token_without_bearer", "bearer lowercase"] {
            let headers = headers_with_auth(value);
            assert!(matches!(
                bearer_token(&headers).unwrap_err(),
                AuthError::InvalidToken
            ));
        }
    }

    #[test]
    fn test_require_passes_with_manage_grant() {
        let user = customer_with(vec![Permission {
            resource: Resource::Product,
            action: Action::Manage,
        }]);

        assert!(user.require(Resource::Product, Action::Delete).is_ok());
        assert!(user.require(Resource::Product, Action::Create).is_ok());
    }

    #[test]
    fn test_require_rejects_other_resource() {
        let user = customer_with(vec![Permission {
            resource: Resource::Product,
            action: Action::Manage,
        }]);

        let err = user.require(Resource::User, Action::Delete).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Forbidden {
                resource: Resource::User,
                action: Action::Delete,
            }
        ));
    }

    #[test]
    fn test_require_rejects_empty_permission_list() {
        let user = customer_with(vec![]);
        assert!(user.require(Resource::Blog, Action::Read).is_err());
    }
}
