// Validation utilities module
// Custom validation functions for domain-specific rules

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Validates that a blog status is one of the accepted values
/// Valid values: "draft", "published", "archived" (case-insensitive)
pub fn validate_blog_status(status: &str) -> Result<(), ValidationError> {
    let valid = ["draft", "published", "archived"];
    if valid.contains(&status.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_blog_status"))
    }
}

/// Validates that a contact status is one of the accepted values
/// Valid values: "new", "read", "closed" (case-insensitive)
pub fn validate_contact_status(status: &str) -> Result<(), ValidationError> {
    let valid = ["new", "read", "closed"];
    if valid.contains(&status.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_contact_status"))
    }
}

/// Validates a phone number: optional leading +, 7 to 15 digits,
/// spaces and dashes allowed between groups
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9](?:[0-9 \-]{5,13})[0-9]$").expect("phone regex is valid")
    });

    if re.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

/// Validates that a price is positive (for required Decimal fields)
pub fn validate_positive_price(price: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blog_status_values() {
        assert!(validate_blog_status("draft").is_ok());
        assert!(validate_blog_status("Published").is_ok());
        assert!(validate_blog_status("ARCHIVED").is_ok());
        assert!(validate_blog_status("deleted").is_err());
        assert!(validate_blog_status("").is_err());
    }

    #[test]
    fn test_contact_status_values() {
        assert!(validate_contact_status("new").is_ok());
        assert!(validate_contact_status("Read").is_ok());
        assert!(validate_contact_status("closed").is_ok());
        assert!(validate_contact_status("open").is_err());
    }

    #[test]
    fn test_phone_formats() {
        assert!(validate_phone("+212612345678").is_ok());
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("06 12 34 56 78").is_ok());
        assert!(validate_phone("06-12-34-56-78").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not-a-phone").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_positive_price() {
        assert!(validate_positive_price(&dec!(12.50)).is_ok());
        assert!(validate_positive_price(&dec!(0)).is_err());
        assert!(validate_positive_price(&dec!(-3.00)).is_err());
    }
}
