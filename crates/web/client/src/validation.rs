//! Contact form field rules.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Address shape accepted by the email field.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// The validated contact form fields. Each field's `name` is also its
/// element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "message" => Some(FormField::Message),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    /// Check a raw (untrimmed) value against this field's rule.
    pub fn validate(self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        match self {
            FormField::Name => {
                if value.is_empty() {
                    Err(FieldError::NameRequired)
                } else if value.chars().count() < NAME_MIN_CHARS {
                    Err(FieldError::NameTooShort)
                } else {
                    Ok(())
                }
            }
            FormField::Email => {
                if value.is_empty() {
                    Err(FieldError::EmailRequired)
                } else if !EMAIL_RE.is_match(value) {
                    Err(FieldError::EmailInvalid)
                } else {
                    Ok(())
                }
            }
            FormField::Message => {
                if value.is_empty() {
                    Err(FieldError::MessageRequired)
                } else if value.chars().count() < MESSAGE_MIN_CHARS {
                    Err(FieldError::MessageTooShort)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Why a field was rejected. `Display` is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

/// Validate a field by its form name. Fields without a rule always pass.
pub fn validate_field(name: &str, value: &str) -> Result<(), FieldError> {
    match FormField::from_name(name) {
        Some(field) => field.validate(value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_field("name", ""), Err(FieldError::NameRequired));
        assert_eq!(validate_field("name", "   "), Err(FieldError::NameRequired));
        assert_eq!(validate_field("name", "J"), Err(FieldError::NameTooShort));
        assert_eq!(validate_field("name", " J "), Err(FieldError::NameTooShort));
        assert_eq!(validate_field("name", "Jo"), Ok(()));
        assert_eq!(validate_field("name", "Jane Doe"), Ok(()));
    }

    #[test]
    fn test_name_counts_characters() {
        assert_eq!(validate_field("name", "é"), Err(FieldError::NameTooShort));
        assert_eq!(validate_field("name", "李明"), Ok(()));
    }

    #[test]
    fn test_short_name_message() {
        let err = validate_field("name", "x").unwrap_err();
        assert!(err.to_string().contains("at least 2 characters"));
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_field("email", ""), Err(FieldError::EmailRequired));
        for bad in [
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@@example.com",
            "ja ne@example.com",
            "jane@exa mple.com",
            "jane@example.",
        ] {
            assert_eq!(validate_field("email", bad), Err(FieldError::EmailInvalid), "{bad}");
        }
        assert_eq!(validate_field("email", "jane@example.com"), Ok(()));
        assert_eq!(validate_field("email", "  jane@example.co.uk  "), Ok(()));
    }

    #[test]
    fn test_message_rules() {
        assert_eq!(validate_field("message", ""), Err(FieldError::MessageRequired));
        assert_eq!(validate_field("message", "Too short"), Err(FieldError::MessageTooShort));
        assert_eq!(validate_field("message", "123456789"), Err(FieldError::MessageTooShort));
        assert_eq!(validate_field("message", "1234567890"), Ok(()));
        assert_eq!(
            validate_field("message", "Hello, this is a test message."),
            Ok(())
        );
    }

    #[test]
    fn test_unknown_field_passes() {
        assert_eq!(validate_field("phone", ""), Ok(()));
        assert_eq!(validate_field("_subject", "x"), Ok(()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::NameRequired.to_string(), "Name is required");
        assert_eq!(
            FieldError::EmailInvalid.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            FieldError::MessageTooShort.to_string(),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
    }
}
