use crate::domain::validation::is_required_field_filled;

/// Free text that must contain something other than whitespace.
/// Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(s: String) -> Result<RequiredText, String> {
        if is_required_field_filled(&s) {
            Ok(Self(s.trim().to_string()))
        } else {
            Err("Required text cannot be blank.".to_string())
        }
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
