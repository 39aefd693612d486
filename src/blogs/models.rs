use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::query::{QueryError, QueryValidator, SortOrder};

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a blog post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlog {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 300))]
    pub slug: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(url)]
    pub cover_image_url: Option<String>,
    #[validate(custom = "crate::validation::validate_blog_status")]
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "draft".to_string()
}

/// Payload for partially updating a blog post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlog {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    #[validate(url)]
    pub cover_image_url: Option<String>,
    #[validate(custom = "crate::validation::validate_blog_status")]
    pub status: Option<String>,
}

/// Raw query parameters for the blog list endpoint
#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Validated blog list filters; always sorted by creation date
#[derive(Debug)]
pub struct BlogFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl BlogFilters {
    pub fn from_query(query: BlogQuery) -> Result<Self, QueryError> {
        let status = QueryValidator::normalize_string(query.status);
        if let Some(ref status) = status {
            if crate::validation::validate_blog_status(status).is_err() {
                return Err(QueryError {
                    message: format!(
                        "Invalid status '{}'. Must be 'draft', 'published' or 'archived'",
                        status
                    ),
                });
            }
        }

        let (page, limit) = QueryValidator::validate_pagination(&crate::query::PageParams {
            page: query.page,
            limit: query.limit,
        })?;

        Ok(Self {
            search: QueryValidator::normalize_string(query.search),
            status,
            category: QueryValidator::normalize_string(query.category),
            order: QueryValidator::parse_sort_order(query.order, SortOrder::Desc)?,
            page,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_query() -> BlogQuery {
        BlogQuery {
            search: None,
            status: None,
            category: None,
            order: None,
            page: None,
            limit: None,
        }
    }

    #[test]
    fn test_filters_default_to_newest_first() {
        let filters = BlogFilters::from_query(empty_query()).unwrap();
        assert_eq!(filters.order, SortOrder::Desc);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, 10);
    }

    #[test]
    fn test_filters_reject_unknown_status() {
        let mut query = empty_query();
        query.status = Some("hidden".to_string());
        assert!(BlogFilters::from_query(query).is_err());

        let mut query = empty_query();
        query.status = Some("published".to_string());
        assert!(BlogFilters::from_query(query).is_ok());
    }

    #[test]
    fn test_create_blog_defaults_to_draft() {
        let blog: CreateBlog = serde_json::from_str(
            r#"{
                "title": "Spring Pasture Care",
                "slug": "spring-pasture-care",
                "author": "Amel",
                "body": "Rotate early and often."
            }"#,
        )
        .unwrap();

        assert_eq!(blog.status, "draft");
        assert!(validator::Validate::validate(&blog).is_ok());
    }

    #[test]
    fn test_create_blog_rejects_bad_status() {
        let blog = CreateBlog {
            title: "t".to_string(),
            slug: "t".to_string(),
            author: "a".to_string(),
            category: None,
            body: "b".to_string(),
            cover_image_url: None,
            status: "hidden".to_string(),
        };
        assert!(validator::Validate::validate(&blog).is_err());
    }
}
