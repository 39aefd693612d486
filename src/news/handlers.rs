// HTTP handlers for news endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{Action, CurrentUser, Resource};
use crate::error::ApiError;
use crate::news::models::{CreateNewsItem, NewsItem, NewsQuery, UpdateNewsItem};
use crate::query::{PageParams, QueryValidator};
use crate::AppState;

/// Handler for GET /api/news
/// Public; `?active=true` hides deactivated items
pub async fn list_news_handler(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let (page, limit) = QueryValidator::validate_pagination(&PageParams {
        page: query.page,
        limit: query.limit,
    })?;

    let items = state
        .news
        .list(query.active.unwrap_or(false), page, limit)
        .await?;

    Ok(Json(items))
}

/// Handler for GET /api/news/:id
pub async fn get_news_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .news
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "News".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(item))
}

/// Handler for POST /api/news
/// Requires NEWS CREATE permission
pub async fn create_news_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateNewsItem>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    user.require(Resource::News, Action::Create)?;
    payload.validate()?;

    let item = state.news.create(&payload).await?;
    tracing::info!("User {} created news item {}", user.id, item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT /api/news/:id
/// Requires NEWS UPDATE permission; partial update
pub async fn update_news_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNewsItem>,
) -> Result<Json<NewsItem>, ApiError> {
    user.require(Resource::News, Action::Update)?;
    payload.validate()?;

    let item = state.news.update(id, payload).await?;
    Ok(Json(item))
}

/// Handler for DELETE /api/news/:id
/// Requires NEWS DELETE permission
pub async fn delete_news_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Resource::News, Action::Delete)?;

    state.news.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
