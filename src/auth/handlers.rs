// HTTP handlers for authentication endpoints

use crate::auth::{
    error::AuthError,
    middleware::CurrentUser,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse, VerifyEmailRequest},
};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

/// Register a new user
/// POST /api/auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Verify a registered email with the one-time code
/// POST /api/auth/verify
pub async fn verify_email_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state.auth.verify_email(&request.email, &request.code).await?;
    Ok(Json(response))
}

/// Login a user
/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state.auth.login(request).await?;
    Ok(Json(response))
}

/// Get current user information (protected endpoint)
/// GET /api/auth/me
pub async fn me_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserResponse>, AuthError> {
    let response = state.auth.current_user(user.id).await?;
    Ok(Json(response))
}
