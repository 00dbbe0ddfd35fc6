use crate::domain::contact_submission::parse_email;
use crate::domain::validation::ValidationErrors;
use crate::domain::{EmailAddress, FormSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uniqueness of `email` is enforced by the backend, not here.
#[derive(Debug, Clone)]
pub struct NewsletterSubscription {
    pub email: EmailAddress,
    pub subscribed_at: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl NewsletterSubscription {
    pub fn new(email: EmailAddress) -> Self {
        Self {
            email,
            subscribed_at: Utc::now(),
            status: SubscriptionStatus::Active,
        }
    }
}

impl TryFrom<&FormSnapshot> for NewsletterSubscription {
    type Error = ValidationErrors;

    fn try_from(snapshot: &FormSnapshot) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::default();
        match parse_email(snapshot, &mut errors) {
            Some(email) => Ok(Self::new(email)),
            None => Err(errors),
        }
    }
}
