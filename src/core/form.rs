//! Contact form validation and message composition

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+\-()]+$").expect("valid regex"));

/// Names of the contact form fields, in message order
pub const FIELD_NAMES: [&str; 5] = ["name", "email", "phone", "service", "message"];

/// Notification shown after a submission is handed off
pub const SUBMITTED_MESSAGE: &str = "Thank you! Your message will be sent via WhatsApp.";

/// Validation rule family of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Telephone,
}

impl FieldKind {
    /// Map an `<input type>` value to its rule family.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Telephone,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Validate one field value. Format rules only apply to non-empty values.
pub fn validate_field(value: &str, kind: FieldKind, required: bool) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }
    match kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Telephone if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Error state of each field after its last validation pass
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`.
    pub fn record(&mut self, field: &str, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.fields.remove(field);
            }
            Err(error) => {
                self.fields.insert(field.to_string(), error);
            }
        }
    }

    /// Drop the error of `field` after an edit, returning it if one
    /// was recorded. The inline message is removed either way.
    pub fn clear(&mut self, field: &str) -> Option<FieldError> {
        self.fields.remove(field)
    }

    /// Forget every error when the form is reset, returning the fields
    /// that had one.
    pub fn reset(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fields).into_keys().collect()
    }

    pub fn error(&self, field: &str) -> Option<FieldError> {
        self.fields.get(field).copied()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The values read from the contact form on submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactSubmission {
    /// Build a submission from a field lookup; missing fields read as empty.
    pub fn from_fields(mut field: impl FnMut(&str) -> Option<String>) -> Self {
        let mut read = |name: &str| field(name).unwrap_or_default();
        Self {
            name: read("name"),
            email: read("email"),
            phone: read("phone"),
            service: read("service"),
            message: read("message"),
        }
    }

    /// The text handed to the messaging link.
    pub fn compose_message(&self) -> String {
        format!(
            "Hi! I'm {}.\n\nEmail: {}\nPhone: {}\nService: {}\n\nMessage: {}",
            self.name, self.email, self.phone, self.service, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messaging::MessagingLink;

    #[test]
    fn test_required_field() {
        assert_eq!(validate_field("", FieldKind::Text, true), Err(FieldError::Required));
        assert_eq!(validate_field("   ", FieldKind::Text, true), Err(FieldError::Required));
        assert_eq!(validate_field("", FieldKind::Text, false), Ok(()));
        assert_eq!(validate_field("Ann", FieldKind::Text, true), Ok(()));
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("abc@def.com"));
        assert!(!is_valid_email("abc@def"));
        assert!(!is_valid_email("abc def@ghi.com"));
        assert!(!is_valid_email("@def.com"));
        assert_eq!(
            validate_field("abc@def", FieldKind::Email, true),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate_field(" abc@def.com ", FieldKind::Email, true), Ok(()));
    }

    #[test]
    fn test_phone_rule() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(!is_valid_phone("call-me"));
        assert_eq!(
            validate_field("call-me", FieldKind::Telephone, false),
            Err(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn test_phone_rule_is_ascii_digits_only() {
        assert!(is_valid_phone("022 5550100"));
        assert!(!is_valid_phone("١٢٣٤٥٦"));
        assert!(!is_valid_phone("１２３４"));
    }

    #[test]
    fn test_empty_optional_email_skips_format() {
        assert_eq!(validate_field("", FieldKind::Email, false), Ok(()));
    }

    #[test]
    fn test_field_kind_from_input_type() {
        assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Telephone);
        assert_eq!(FieldKind::from_input_type("text"), FieldKind::Text);
        assert_eq!(FieldKind::from_input_type("select-one"), FieldKind::Text);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            FieldError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_form_errors_track_last_pass() {
        let mut errors = FormErrors::new();
        errors.record("email", validate_field("abc@def", FieldKind::Email, true));
        assert_eq!(errors.error("email"), Some(FieldError::InvalidEmail));

        errors.clear("email");
        assert!(!errors.has_error("email"));

        errors.record("name", Err(FieldError::Required));
        errors.record("name", Ok(()));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_reset_then_input_still_clears() {
        let mut errors = FormErrors::new();
        errors.record("phone", validate_field("call-me", FieldKind::Telephone, false));
        errors.record("email", validate_field("abc@def", FieldKind::Email, true));

        assert_eq!(errors.reset(), vec!["email".to_string(), "phone".to_string()]);
        assert!(errors.is_empty());

        // An edit after the reset finds nothing recorded.
        assert_eq!(errors.clear("phone"), None);

        errors.record("phone", Err(FieldError::InvalidPhone));
        assert_eq!(errors.clear("phone"), Some(FieldError::InvalidPhone));
        assert!(!errors.has_error("phone"));
    }

    #[test]
    fn test_compose_message_contains_every_field() {
        let submission = ContactSubmission {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+91 98200 00000".to_string(),
            service: "Web Development".to_string(),
            message: "Need a quote & timeline".to_string(),
        };
        let text = submission.compose_message();
        assert!(text.starts_with("Hi! I'm Ann Lee."));
        assert!(text.contains("Email: ann@example.com"));
        assert!(text.contains("Phone: +91 98200 00000"));
        assert!(text.contains("Service: Web Development"));
        assert!(text.ends_with("Message: Need a quote & timeline"));
    }

    #[test]
    fn test_submission_link_decodes_to_fields() {
        let submission = ContactSubmission::from_fields(|name| {
            Some(match name {
                "name" => "Ravi".to_string(),
                "email" => "ravi@site.in".to_string(),
                "phone" => "(022) 555-0100".to_string(),
                "service" => "SEO".to_string(),
                _ => "Call me after 5pm?".to_string(),
            })
        });

        let url = MessagingLink::default().url(&submission.compose_message(), None);
        let (_, encoded) = url.split_once("?text=").unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        for value in ["Ravi", "ravi@site.in", "(022) 555-0100", "SEO", "Call me after 5pm?"] {
            assert!(decoded.contains(value), "missing {value}");
        }
    }

    #[test]
    fn test_missing_fields_read_empty() {
        let submission = ContactSubmission::from_fields(|_| None);
        assert_eq!(submission, ContactSubmission::default());
    }
}
