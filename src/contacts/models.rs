use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for the public contact form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "crate::validation::validate_phone")]
    pub phone: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

/// Payload for moving a submission through the triage workflow
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContactStatus {
    #[validate(custom = "crate::validation::validate_contact_status")]
    pub status: String,
}

/// Query parameters for the contact list endpoint
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact() -> CreateContact {
        CreateContact {
            name: "Lina Farès".to_string(),
            email: "lina@example.com".to_string(),
            phone: Some("+213 555 010203".to_string()),
            message: "I would like a quote for ten saddle pads.".to_string(),
        }
    }

    #[test]
    fn test_create_contact_valid() {
        assert!(sample_contact().validate().is_ok());
    }

    #[test]
    fn test_create_contact_rejects_short_message() {
        let contact = CreateContact {
            message: "hi".to_string(),
            ..sample_contact()
        };
        assert!(contact.validate().is_err());
    }

    #[test]
    fn test_create_contact_rejects_bad_email() {
        let contact = CreateContact {
            email: "not-an-email".to_string(),
            ..sample_contact()
        };
        assert!(contact.validate().is_err());
    }

    #[test]
    fn test_create_contact_phone_optional() {
        let contact = CreateContact {
            phone: None,
            ..sample_contact()
        };
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn test_status_update_validation() {
        for status in ["new", "read", "closed"] {
            let payload = UpdateContactStatus {
                status: status.to_string(),
            };
            assert!(payload.validate().is_ok(), "{status} should be accepted");
        }

        let payload = UpdateContactStatus {
            status: "archived".to_string(),
        };
        assert!(payload.validate().is_err());
    }
}
