use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A news item, typically syndicated from an external source
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub source_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a news item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewsItem {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(url)]
    pub source_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Payload for partially updating a news item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNewsItem {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    #[validate(url)]
    pub source_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Query parameters for the news list endpoint
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_news_validation() {
        let valid = CreateNewsItem {
            title: "Regional championship results".to_string(),
            body: "Full results inside.".to_string(),
            source_url: Some("https://example.com/results".to_string()),
            published_at: None,
            is_active: true,
        };
        assert!(valid.validate().is_ok());

        let bad_url = CreateNewsItem {
            source_url: Some("not a url".to_string()),
            ..valid
        };
        assert!(bad_url.validate().is_err());
    }
}
