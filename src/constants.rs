//! User-facing copy shown after a submission

/// Shown when the backend could not be reached or is not configured
pub const ERROR_SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again later.";

/// Prefix for errors reported by the backend; its own message follows
pub const ERROR_SUBMISSION_REJECTED: &str = "Sorry, we couldn't save that:";

/// Contact form: message stored
pub const CONTACT_MESSAGE_SENT: &str = "Thank you for your message! I'll get back to you soon.";

/// Newsletter form: new subscriber stored
pub const NEWSLETTER_SUBSCRIBED: &str = "Thank you for subscribing! Check your inbox for updates.";

/// Newsletter form: the address was already on the list
pub const NEWSLETTER_ALREADY_SUBSCRIBED: &str = "You're already subscribed! Thank you.";

/// Submit label while a contact message is in flight
pub const CONTACT_BUSY_LABEL: &str = "Sending...";

/// Submit label while a subscription is in flight
pub const NEWSLETTER_BUSY_LABEL: &str = "Subscribing...";

pub fn rejected_message(backend_message: &str) -> String {
    format!("{} {}", ERROR_SUBMISSION_REJECTED, backend_message)
}
