// HTTP handlers for blog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{Action, CurrentUser, Resource};
use crate::blogs::models::{Blog, BlogFilters, BlogQuery, CreateBlog, UpdateBlog};
use crate::error::ApiError;
use crate::AppState;

/// Handler for GET /api/blogs
/// Public listing with status/category filters, title search and pagination
pub async fn list_blogs_handler(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Vec<Blog>>, ApiError> {
    let filters = BlogFilters::from_query(query)?;
    let blogs = state.blogs.list(&filters).await?;
    Ok(Json(blogs))
}

/// Handler for GET /api/blogs/:id
pub async fn get_blog_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(blog))
}

/// Handler for POST /api/blogs
/// Requires BLOG CREATE permission
pub async fn create_blog_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateBlog>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    user.require(Resource::Blog, Action::Create)?;
    payload.validate()?;

    if state.blogs.slug_exists(&payload.slug).await? {
        return Err(ApiError::Conflict {
            message: format!("Blog with slug '{}' already exists", payload.slug),
        });
    }

    let blog = state.blogs.create(&payload).await?;
    tracing::info!("User {} created blog {}", user.id, blog.id);

    Ok((StatusCode::CREATED, Json(blog)))
}

/// Handler for PUT /api/blogs/:id
/// Requires BLOG UPDATE permission; partial update
pub async fn update_blog_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlog>,
) -> Result<Json<Blog>, ApiError> {
    user.require(Resource::Blog, Action::Update)?;
    payload.validate()?;

    let blog = state.blogs.update(id, payload).await?;
    tracing::info!("User {} updated blog {}", user.id, id);

    Ok(Json(blog))
}

/// Handler for DELETE /api/blogs/:id
/// Requires BLOG DELETE permission
pub async fn delete_blog_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Resource::Blog, Action::Delete)?;

    state.blogs.delete(id).await?;
    tracing::info!("User {} deleted blog {}", user.id, id);

    Ok(StatusCode::NO_CONTENT)
}
