use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A site-wide announcement, optionally limited to a display window
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an announcement
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct CreateAnnouncement {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Payload for partially updating an announcement
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateAnnouncement {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    pub is_active: Option<bool>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// True when the window is open-ended or ends after it starts
/// The repository applies this to the merged window on partial updates,
/// where one bound may come from the payload and the other from the row.
pub fn window_is_ordered(starts_at: Option<DateTime<Utc>>, ends_at: Option<DateTime<Utc>>) -> bool {
    match (starts_at, ends_at) {
        (Some(starts), Some(ends)) => ends > starts,
        _ => true,
    }
}

/// The display window must not end before it starts
fn validate_window(payload: &CreateAnnouncement) -> Result<(), ValidationError> {
    if !window_is_ordered(payload.starts_at, payload.ends_at) {
        return Err(ValidationError::new("window_ends_before_start"));
    }
    Ok(())
}

/// Same invariant on the update payload when both bounds are supplied
fn validate_update_window(payload: &UpdateAnnouncement) -> Result<(), ValidationError> {
    if !window_is_ordered(payload.starts_at, payload.ends_at) {
        return Err(ValidationError::new("window_ends_before_start"));
    }
    Ok(())
}

/// Query parameters for the announcement list endpoint
#[derive(Debug, Deserialize)]
pub struct AnnouncementQuery {
    /// When true, only announcements whose window contains the current time
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_window_validation() {
        let now = Utc::now();
        let valid = CreateAnnouncement {
            title: "Summer camp registration open".to_string(),
            body: "Sign up at the front desk.".to_string(),
            is_active: true,
            starts_at: Some(now),
            ends_at: Some(now + Duration::days(7)),
        };
        assert!(valid.validate().is_ok());

        let inverted = CreateAnnouncement {
            starts_at: Some(now),
            ends_at: Some(now - Duration::days(1)),
            ..valid.clone()
        };
        assert!(inverted.validate().is_err());

        let open_ended = CreateAnnouncement {
            starts_at: Some(now),
            ends_at: None,
            ..valid
        };
        assert!(open_ended.validate().is_ok());
    }

    #[test]
    fn test_update_window_validation() {
        let now = Utc::now();
        let inverted = UpdateAnnouncement {
            title: None,
            body: None,
            is_active: None,
            starts_at: Some(now),
            ends_at: Some(now - Duration::days(3)),
        };
        assert!(inverted.validate().is_err());

        let reordered = UpdateAnnouncement {
            starts_at: Some(now),
            ends_at: Some(now + Duration::days(3)),
            ..inverted.clone()
        };
        assert!(reordered.validate().is_ok());

        let single_bound = UpdateAnnouncement {
            starts_at: None,
            ends_at: Some(now - Duration::days(3)),
            ..inverted
        };
        assert!(single_bound.validate().is_ok());
    }

    #[test]
    fn test_merged_window_ordering() {
        let now = Utc::now();

        // One bound from a payload, the other from the stored row
        assert!(!window_is_ordered(
            Some(now),
            Some(now - Duration::hours(1))
        ));
        assert!(window_is_ordered(Some(now), Some(now + Duration::hours(1))));
        assert!(window_is_ordered(Some(now), None));
        assert!(window_is_ordered(None, Some(now)));
        assert!(window_is_ordered(None, None));
    }

    #[test]
    fn test_create_defaults_to_active() {
        let payload: CreateAnnouncement = serde_json::from_str(
            r#"{"title": "Arena closed", "body": "Maintenance on Friday."}"#,
        )
        .unwrap();
        assert!(payload.is_active);
    }
}
