use sqlx::PgPool;

use crate::error::ApiError;
use crate::news::models::{CreateNewsItem, NewsItem, UpdateNewsItem};
use crate::query::{SortOrder, SqlQueryBuilder};

const NEWS_COLUMNS: &str = "id, title, body, source_url, published_at, is_active, created_at";

/// Repository for news item operations
#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    /// Create a new NewsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List news items, most recently published first
    pub async fn list(
        &self,
        active_only: bool,
        page: u32,
        limit: u32,
    ) -> Result<Vec<NewsItem>, ApiError> {
        let mut builder = SqlQueryBuilder::new("news");

        if active_only {
            builder.add_bool_filter("is_active", true);
        }
        builder.set_sort("published_at", SortOrder::Desc);
        builder.set_pagination(page, limit);

        let (query_str, _) = builder.build();
        let items = sqlx::query_as::<_, NewsItem>(&query_str)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Find a news item by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<NewsItem>, ApiError> {
        let item = sqlx::query_as::<_, NewsItem>(&format!(
            "SELECT {} FROM news WHERE id = $1",
            NEWS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Insert a new news item
    /// `published_at` defaults to now when omitted.
    pub async fn create(&self, payload: &CreateNewsItem) -> Result<NewsItem, ApiError> {
        let item = sqlx::query_as::<_, NewsItem>(&format!(
            "INSERT INTO news (title, body, source_url, published_at, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5) \
             RETURNING {}",
            NEWS_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.body)
        .bind(&payload.source_url)
        .bind(payload.published_at)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i32, payload: UpdateNewsItem) -> Result<NewsItem, ApiError> {
        let existing = self.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
            resource: "News".to_string(),
            id: id.to_string(),
        })?;

        let item = sqlx::query_as::<_, NewsItem>(&format!(
            "UPDATE news \
             SET title = $1, body = $2, source_url = $3, published_at = $4, is_active = $5 \
             WHERE id = $6 \
             RETURNING {}",
            NEWS_COLUMNS
        ))
        .bind(payload.title.unwrap_or(existing.title))
        .bind(payload.body.unwrap_or(existing.body))
        .bind(payload.source_url.or(existing.source_url))
        .bind(payload.published_at.unwrap_or(existing.published_at))
        .bind(payload.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a news item by ID
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: "News".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
