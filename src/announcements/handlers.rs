// HTTP handlers for announcement endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::announcements::models::{
    Announcement, AnnouncementQuery, CreateAnnouncement, UpdateAnnouncement,
};
use crate::auth::{Action, CurrentUser, Resource};
use crate::error::ApiError;
use crate::query::{PageParams, QueryValidator};
use crate::AppState;

/// Handler for GET /api/announcements
/// Public; `?active=true` returns only currently-displayed announcements
pub async fn list_announcements_handler(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementQuery>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let (page, limit) = QueryValidator::validate_pagination(&PageParams {
        page: query.page,
        limit: query.limit,
    })?;

    let announcements = state
        .announcements
        .list(query.active.unwrap_or(false), page, limit)
        .await?;

    Ok(Json(announcements))
}

/// Handler for POST /api/announcements
/// Requires ANNOUNCEMENT CREATE permission
pub async fn create_announcement_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateAnnouncement>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    user.require(Resource::Announcement, Action::Create)?;
    payload.validate()?;

    let announcement = state.announcements.create(&payload).await?;
    tracing::info!("User {} created announcement {}", user.id, announcement.id);

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Handler for PUT /api/announcements/:id
/// Requires ANNOUNCEMENT UPDATE permission; partial update
pub async fn update_announcement_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAnnouncement>,
) -> Result<Json<Announcement>, ApiError> {
    user.require(Resource::Announcement, Action::Update)?;
    payload.validate()?;

    let announcement = state.announcements.update(id, payload).await?;
    Ok(Json(announcement))
}

/// Handler for DELETE /api/announcements/:id
/// Requires ANNOUNCEMENT DELETE permission
pub async fn delete_announcement_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Resource::Announcement, Action::Delete)?;

    state.announcements.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
