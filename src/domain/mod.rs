mod contact_submission;
mod email_address;
mod form_snapshot;
mod newsletter_subscription;
mod required_text;
pub mod validation;

pub use contact_submission::{ContactSubmission, EMAIL_FIELD, MESSAGE_FIELD, NAME_FIELD};
pub use email_address::EmailAddress;
pub use form_snapshot::FormSnapshot;
pub use newsletter_subscription::{NewsletterSubscription, SubscriptionStatus};
pub use required_text::RequiredText;
pub use validation::{
    FieldError, ValidationErrors, is_required_field_filled, is_valid_email,
};
