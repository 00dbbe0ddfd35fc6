use crate::domain::validation::{
    INVALID_EMAIL_MESSAGE, REQUIRED_FIELD_MESSAGE, ValidationErrors,
};
use crate::domain::{EmailAddress, FormSnapshot, RequiredText};
use chrono::{DateTime, Utc};

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const MESSAGE_FIELD: &str = "message";

/// A message left through the contact form, stamped when it is submitted.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: RequiredText,
    pub email: EmailAddress,
    pub message: RequiredText,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&FormSnapshot> for ContactSubmission {
    type Error = ValidationErrors;

    fn try_from(snapshot: &FormSnapshot) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::default();
        let name = RequiredText::parse(snapshot.value(NAME_FIELD).to_string())
            .map_err(|_| errors.push(NAME_FIELD, REQUIRED_FIELD_MESSAGE))
            .ok();
        let email = parse_email(snapshot, &mut errors);
        let message = RequiredText::parse(snapshot.value(MESSAGE_FIELD).to_string())
            .map_err(|_| errors.push(MESSAGE_FIELD, REQUIRED_FIELD_MESSAGE))
            .ok();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(Self {
                name,
                email,
                message,
                created_at: Utc::now(),
            }),
            _ => Err(errors),
        }
    }
}

/// Blank input is reported as missing rather than malformed.
pub(crate) fn parse_email(
    snapshot: &FormSnapshot,
    errors: &mut ValidationErrors,
) -> Option<EmailAddress> {
    let raw = snapshot.value(EMAIL_FIELD);
    if raw.trim().is_empty() {
        errors.push(EMAIL_FIELD, REQUIRED_FIELD_MESSAGE);
        return None;
    }
    EmailAddress::parse(raw.to_string())
        .map_err(|_| errors.push(EMAIL_FIELD, INVALID_EMAIL_MESSAGE))
        .ok()
}
