use crate::backend_client::{RemoteError, SubmissionStore};
use crate::configuration::NotificationSettings;
use crate::constants::{
    CONTACT_BUSY_LABEL, CONTACT_MESSAGE_SENT, ERROR_SOMETHING_WENT_WRONG,
    NEWSLETTER_ALREADY_SUBSCRIBED, NEWSLETTER_BUSY_LABEL, NEWSLETTER_SUBSCRIBED, rejected_message,
};
use crate::domain::{
    ContactSubmission, EMAIL_FIELD, FormSnapshot, MESSAGE_FIELD, NAME_FIELD,
    NewsletterSubscription, ValidationErrors,
};
use crate::events::{SubmitEvent, SubmitListener};
use crate::notifications::{BannerKind, NotificationPresenter};
use crate::ui::FormElement;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Newsletter,
}

impl FormKind {
    /// Parses the value of the form marker attribute.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_lowercase().as_str() {
            "contact" => Some(Self::Contact),
            "newsletter" => Some(Self::Newsletter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Newsletter => "newsletter",
        }
    }

    fn busy_label(&self) -> &'static str {
        match self {
            FormKind::Contact => CONTACT_BUSY_LABEL,
            FormKind::Newsletter => NEWSLETTER_BUSY_LABEL,
        }
    }

    fn field_keys(&self) -> &'static [&'static str] {
        match self {
            FormKind::Contact => &[NAME_FIELD, EMAIL_FIELD, MESSAGE_FIELD],
            FormKind::Newsletter => &[EMAIL_FIELD],
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The banner rendered for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: BannerKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The row was stored.
    Success(Notice),
    /// The backend answered with a refusal; the user may correct and resubmit.
    Recoverable(Notice),
    /// The backend was never reached (unconfigured, network, timeout).
    Fatal(Notice),
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// Another submission of the same form is still running; nothing was done.
    InFlight,
}

impl Outcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Success(notice) | Outcome::Recoverable(notice) | Outcome::Fatal(notice) => {
                Some(notice)
            }
            Outcome::Invalid(_) | Outcome::InFlight => None,
        }
    }
}

/// Runs the validate → insert → report cycle for one form.
pub struct SubmissionCoordinator {
    kind: FormKind,
    form: FormElement,
    store: Arc<dyn SubmissionStore>,
    presenter: NotificationPresenter,
    settings: NotificationSettings,
}

impl SubmissionCoordinator {
    pub fn new(
        kind: FormKind,
        form: FormElement,
        store: Arc<dyn SubmissionStore>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            kind,
            form,
            store,
            presenter: NotificationPresenter::new(settings.banner_duration()),
            settings,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn form(&self) -> &FormElement {
        &self.form
    }

    #[tracing::instrument(
        name = "Handling form submission",
        skip(self, event),
        fields(form_id = %self.form.id(), form_kind = %self.kind)
    )]
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> Outcome {
        event.prevent_default();

        // Restores the button on every path out of this function.
        let Some(_busy) = self.form.submit_button().acquire_busy(self.kind.busy_label()) else {
            tracing::warn!("Ignoring submit while a previous submission is in flight");
            return Outcome::InFlight;
        };
        let snapshot = self.form.snapshot(self.kind.field_keys());

        let outcome = match self.kind {
            FormKind::Contact => self.submit_contact(&snapshot).await,
            FormKind::Newsletter => self.submit_newsletter(&snapshot).await,
        };

        if let Some(notice) = outcome.notice() {
            self.presenter
                .show(notice.kind, notice.message.clone(), self.form.banner_container());
        }
        outcome
    }

    async fn submit_contact(&self, snapshot: &FormSnapshot) -> Outcome {
        let submission = match self.validate(snapshot, ContactSubmission::try_from) {
            Ok(submission) => submission,
            Err(errors) => return Outcome::Invalid(errors),
        };
        match self.store.insert_contact(&submission).await {
            Ok(_) => {
                tracing::info!("Contact message stored");
                self.form.reset();
                self.reveal_sent_indicator();
                Outcome::Success(Notice::success(CONTACT_MESSAGE_SENT))
            }
            Err(e) => self.classify_failure(e),
        }
    }

    async fn submit_newsletter(&self, snapshot: &FormSnapshot) -> Outcome {
        let subscription = match self.validate(snapshot, NewsletterSubscription::try_from) {
            Ok(subscription) => subscription,
            Err(errors) => return Outcome::Invalid(errors),
        };
        match self.store.insert_subscriber(&subscription).await {
            Ok(_) => {
                tracing::info!("Newsletter subscriber stored");
                self.form.reset();
                self.schedule_modal_close();
                Outcome::Success(Notice::success(NEWSLETTER_SUBSCRIBED))
            }
            Err(e) if e.is_unique_violation() => {
                tracing::info!(
                    error.message = %e,
                    "Address is already on the newsletter list"
                );
                Outcome::Recoverable(Notice::success(NEWSLETTER_ALREADY_SUBSCRIBED))
            }
            Err(e) => self.classify_failure(e),
        }
    }

    /// Markup rules first, then the domain parse; the field errors shown
    /// afterwards reflect exactly this attempt.
    fn validate<'a, T>(
        &self,
        snapshot: &'a FormSnapshot,
        parse: impl FnOnce(&'a FormSnapshot) -> Result<T, ValidationErrors>,
    ) -> Result<T, ValidationErrors> {
        let input_errors = self.form.validate_inputs();
        let result = if input_errors.is_empty() {
            parse(snapshot)
        } else {
            Err(input_errors)
        };
        match &result {
            Ok(_) => self.form.apply_field_errors(&ValidationErrors::default()),
            Err(errors) => {
                tracing::debug!(%errors, "Submission blocked by validation");
                self.form.apply_field_errors(errors);
            }
        }
        result
    }

    fn classify_failure(&self, e: RemoteError) -> Outcome {
        if e.is_rejection() {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                error.code = e.code(),
                "The backend rejected the submission"
            );
            Outcome::Recoverable(Notice::error(rejected_message(&e.to_string())))
        } else {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "The submission never reached the backend"
            );
            Outcome::Fatal(Notice::error(ERROR_SOMETHING_WENT_WRONG))
        }
    }

    fn reveal_sent_indicator(&self) {
        let Some(indicator) = self.form.sent_indicator().cloned() else {
            return;
        };
        // A later success restarts the display window.
        let generation = indicator.show();
        let display_for = self.settings.sent_indicator_duration();
        tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            indicator.hide_if_current(generation);
        });
    }

    /// Leaves the confirmation readable for a moment before closing the
    /// modal hosting the form, if it is still open.
    fn schedule_modal_close(&self) {
        let Some(modal) = self.form.modal().filter(|m| m.is_open()).cloned() else {
            return;
        };
        let delay = self.settings.modal_close_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            modal.close();
        });
    }
}

#[async_trait::async_trait]
impl SubmitListener for SubmissionCoordinator {
    async fn on_submit(&self, event: &mut SubmitEvent) -> Outcome {
        self.handle_submit(event).await
    }
}
