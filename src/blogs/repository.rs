use sqlx::PgPool;

use crate::blogs::models::{Blog, BlogFilters, CreateBlog, UpdateBlog};
use crate::error::ApiError;
use crate::query::SqlQueryBuilder;

const BLOG_COLUMNS: &str =
    "id, title, slug, author, category, body, cover_image_url, status, created_at, updated_at";

/// Repository for blog post operations
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new BlogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List blog posts with status/category filters, title search and pagination
    pub async fn list(&self, filters: &BlogFilters) -> Result<Vec<Blog>, ApiError> {
        let mut builder = SqlQueryBuilder::new("blogs");

        if let Some(ref search) = filters.search {
            builder.add_search_filter("title", search);
        }
        if let Some(ref status) = filters.status {
            builder.add_text_filter("status", status);
        }
        if let Some(ref category) = filters.category {
            builder.add_text_filter("category", category);
        }
        builder.set_sort("created_at", filters.order);
        builder.set_pagination(filters.page, filters.limit);

        let (query_str, params) = builder.build();
        let mut query = sqlx::query_as::<_, Blog>(&query_str);
        for param in params {
            query = query.bind(param);
        }

        let blogs = query.fetch_all(&self.pool).await?;
        Ok(blogs)
    }

    /// Find a blog post by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Blog>, ApiError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {} FROM blogs WHERE id = $1",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(blog)
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, ApiError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Insert a new blog post
    pub async fn create(&self, payload: &CreateBlog) -> Result<Blog, ApiError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "INSERT INTO blogs (title, slug, author, category, body, cover_image_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.slug)
        .bind(&payload.author)
        .bind(&payload.category)
        .bind(&payload.body)
        .bind(&payload.cover_image_url)
        .bind(payload.status.to_lowercase())
        .fetch_one(&self.pool)
        .await?;

        Ok(blog)
    }

    /// Apply a partial update inside a transaction, checking slug uniqueness
    pub async fn update(&self, id: i32, payload: UpdateBlog) -> Result<Blog, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {} FROM blogs WHERE id = $1",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })?;

        if let Some(ref new_slug) = payload.slug {
            if new_slug != &existing.slug {
                let duplicate: Option<bool> = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1 AND id != $2)",
                )
                .bind(new_slug)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                if duplicate.unwrap_or(false) {
                    return Err(ApiError::Conflict {
                        message: format!("Blog with slug '{}' already exists", new_slug),
                    });
                }
            }
        }

        let blog = sqlx::query_as::<_, Blog>(&format!(
            "UPDATE blogs \
             SET title = $1, slug = $2, author = $3, category = $4, body = $5, \
                 cover_image_url = $6, status = $7, updated_at = NOW() \
             WHERE id = $8 \
             RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(payload.title.unwrap_or(existing.title))
        .bind(payload.slug.unwrap_or(existing.slug))
        .bind(payload.author.unwrap_or(existing.author))
        .bind(payload.category.or(existing.category))
        .bind(payload.body.unwrap_or(existing.body))
        .bind(payload.cover_image_url.or(existing.cover_image_url))
        .bind(payload.status.map(|s| s.to_lowercase()).unwrap_or(existing.status))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(blog)
    }

    /// Delete a blog post by ID
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: "Blog".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
