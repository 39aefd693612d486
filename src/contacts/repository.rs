use sqlx::PgPool;
use uuid::Uuid;

use crate::contacts::models::{Contact, CreateContact};
use crate::error::ApiError;
use crate::query::{SortOrder, SqlQueryBuilder};

const CONTACT_COLUMNS: &str = "id, name, email, phone, message, status, created_at";

/// Repository for contact form submissions
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new ContactRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List submissions, newest first, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Contact>, ApiError> {
        let mut builder = SqlQueryBuilder::new("contacts");

        if let Some(status) = status {
            builder.add_text_filter("status", status);
        }
        builder.set_sort("created_at", SortOrder::Desc);
        builder.set_pagination(page, limit);

        let (query_str, params) = builder.build();
        let mut query = sqlx::query_as::<_, Contact>(&query_str);
        for param in params {
            query = query.bind(param);
        }

        let contacts = query.fetch_all(&self.pool).await?;
        Ok(contacts)
    }

    /// Find a submission by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, ApiError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Insert a new submission with status 'new'
    pub async fn create(&self, payload: &CreateContact) -> Result<Contact, ApiError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (name, email, phone, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Move a submission to a new triage status
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Contact, ApiError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts SET status = $1 WHERE id = $2 RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(status.to_lowercase())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Contact".to_string(),
            id: id.to_string(),
        })?;

        Ok(contact)
    }

    /// Delete a submission by ID
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: "Contact".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
