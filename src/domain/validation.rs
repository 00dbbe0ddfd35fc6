//! Syntactic checks applied to form input before anything leaves the page.
//!
//! These are a UX gate, not a correctness guarantee: the backend remains the
//! authority on whether an address is deliverable or already subscribed.

use regex::Regex;
use std::sync::LazyLock;

/// `local@domain.tld`-shaped: no whitespace, exactly one `@`, and at least one
/// `.` in the part after it.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

pub fn is_required_field_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// A rule violation tied to the field key it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: &'static str) {
        let field = field.into();
        // One message per field; the first rule that fails wins.
        if !self.0.iter().any(|e| e.field == field) {
            self.0.push(FieldError { field, message });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "Invalid form input in: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
