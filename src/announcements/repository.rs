use sqlx::PgPool;
use validator::{ValidationError, ValidationErrors};

use crate::announcements::models::{
    window_is_ordered, Announcement, CreateAnnouncement, UpdateAnnouncement,
};
use crate::error::ApiError;
use crate::query::{SortOrder, SqlQueryBuilder};

const ANNOUNCEMENT_COLUMNS: &str = "id, title, body, is_active, starts_at, ends_at, created_at";

/// Repository for announcement operations
#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    /// Create a new AnnouncementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compose the listing query, newest first
    /// With `active_only`, restricts to active rows whose window contains now.
    fn list_query(active_only: bool, page: u32, limit: u32) -> String {
        let mut builder = SqlQueryBuilder::new("announcements");

        if active_only {
            builder.add_bool_filter("is_active", true);
            builder.add_raw_clause("(starts_at IS NULL OR starts_at <= NOW())");
            builder.add_raw_clause("(ends_at IS NULL OR ends_at >= NOW())");
        }
        builder.set_sort("created_at", SortOrder::Desc);
        builder.set_pagination(page, limit);

        let (query_str, _) = builder.build();
        query_str
    }

    /// List announcements
    pub async fn list(
        &self,
        active_only: bool,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Announcement>, ApiError> {
        let query_str = Self::list_query(active_only, page, limit);
        let announcements = sqlx::query_as::<_, Announcement>(&query_str)
            .fetch_all(&self.pool)
            .await?;

        Ok(announcements)
    }

    /// Find an announcement by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Announcement>, ApiError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {} FROM announcements WHERE id = $1",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Insert a new announcement
    pub async fn create(&self, payload: &CreateAnnouncement) -> Result<Announcement, ApiError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (title, body, is_active, starts_at, ends_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.body)
        .bind(payload.is_active)
        .bind(payload.starts_at)
        .bind(payload.ends_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: i32,
        payload: UpdateAnnouncement,
    ) -> Result<Announcement, ApiError> {
        let existing = self.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
            resource: "Announcement".to_string(),
            id: id.to_string(),
        })?;

        // The merged window must stay ordered even when only one bound is
        // in the payload and the other comes from the stored row
        let starts_at = payload.starts_at.or(existing.starts_at);
        let ends_at = payload.ends_at.or(existing.ends_at);
        if !window_is_ordered(starts_at, ends_at) {
            let mut errors = ValidationErrors::new();
            errors.add("ends_at", ValidationError::new("window_ends_before_start"));
            return Err(ApiError::ValidationError(errors));
        }

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "UPDATE announcements \
             SET title = $1, body = $2, is_active = $3, starts_at = $4, ends_at = $5 \
             WHERE id = $6 \
             RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(payload.title.unwrap_or(existing.title))
        .bind(payload.body.unwrap_or(existing.body))
        .bind(payload.is_active.unwrap_or(existing.is_active))
        .bind(starts_at)
        .bind(ends_at)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Delete an announcement by ID
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: "Announcement".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_listing_filters_on_window() {
        let query = AnnouncementRepository::list_query(true, 1, 10);

        assert!(query.contains("is_active = TRUE"));
        assert!(query.contains("(starts_at IS NULL OR starts_at <= NOW())"));
        assert!(query.contains("(ends_at IS NULL OR ends_at >= NOW())"));
        assert!(query.contains("ORDER BY created_at DESC"));
        assert!(query.contains("LIMIT 10"));
        assert!(query.contains("OFFSET 0"));
    }

    #[test]
    fn test_plain_listing_has_no_window_predicate() {
        let query = AnnouncementRepository::list_query(false, 2, 25);

        assert!(!query.contains("WHERE"));
        assert!(query.contains("ORDER BY created_at DESC"));
        assert!(query.contains("LIMIT 25"));
        assert!(query.contains("OFFSET 25"));
    }
}
