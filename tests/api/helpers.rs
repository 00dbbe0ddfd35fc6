use secrecy::Secret;
use site_forms::configuration::{BackendSettings, NotificationSettings, Settings};
use site_forms::coordinator::Outcome;
use site_forms::domain::{EMAIL_FIELD, MESSAGE_FIELD, NAME_FIELD};
use site_forms::startup::Application;
use site_forms::telemetry::{get_subscriber, init_subscriber};
use site_forms::ui::{FORM_MARKER_ATTRIBUTE, FieldElement, FormElement, Modal, Page, SentIndicator};
use std::sync::LazyLock;
use wiremock::MockServer;

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const NEWSLETTER_FORM_ID: &str = "newsletterForm";
pub const CONTACT_LABEL: &str = "Send Message";
pub const NEWSLETTER_LABEL: &str = "Subscribe";
pub const ACCESS_TOKEN: &str = "test-anon-key";

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value of `TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub app: Application,
    pub backend_server: MockServer,
}

impl TestApp {
    pub fn form(&self, id: &str) -> &FormElement {
        self.app.page().form(id).expect("Form missing from the test page.")
    }

    pub fn contact_form(&self) -> &FormElement {
        self.form(CONTACT_FORM_ID)
    }

    pub fn newsletter_form(&self) -> &FormElement {
        self.form(NEWSLETTER_FORM_ID)
    }

    pub fn modal(&self) -> &Modal {
        self.app.page().modal().expect("Modal missing from the test page.")
    }

    pub fn fill_contact_form(&self, name: &str, email: &str, message: &str) {
        let form = self.contact_form();
        form.set_value(NAME_FIELD, name);
        form.set_value(EMAIL_FIELD, email);
        form.set_value(MESSAGE_FIELD, message);
    }

    pub async fn submit_contact(&self) -> Outcome {
        self.app
            .submit(CONTACT_FORM_ID)
            .await
            .expect("No coordinator registered for the contact form.")
    }

    pub async fn submit_newsletter(&self, email: &str) -> Outcome {
        self.newsletter_form().set_value(EMAIL_FIELD, email);
        self.app
            .submit(NEWSLETTER_FORM_ID)
            .await
            .expect("No coordinator registered for the newsletter form.")
    }
}

/// The markup of the site: a contact form on the page and the newsletter
/// form inside the subscribe modal.
pub fn site_page() -> Page {
    let modal = Modal::new("modal");
    let contact = FormElement::builder(CONTACT_FORM_ID)
        .attribute(FORM_MARKER_ATTRIBUTE, "contact")
        .field(FieldElement::new().name(NAME_FIELD).id("contactName").required())
        .field(
            FieldElement::new()
                .name(EMAIL_FIELD)
                .id("contactEmail")
                .input_type("email")
                .required(),
        )
        .field(
            FieldElement::new()
                .name(MESSAGE_FIELD)
                .id("contactMessage")
                .input_type("textarea")
                .required(),
        )
        .submit_label(CONTACT_LABEL)
        .sent_indicator(SentIndicator::new())
        .build();
    let newsletter = FormElement::builder(NEWSLETTER_FORM_ID)
        .attribute(FORM_MARKER_ATTRIBUTE, "newsletter")
        .field(
            FieldElement::new()
                .id("newsletterEmail")
                .input_type("email")
                .required(),
        )
        .submit_label(NEWSLETTER_LABEL)
        .within_modal(modal.clone())
        .build();
    Page::new()
        .with_modal(modal)
        .with_form(contact)
        .with_form(newsletter)
}

pub fn test_settings(endpoint: String) -> Settings {
    Settings {
        backend: BackendSettings {
            endpoint,
            access_token: Secret::new(ACCESS_TOKEN.to_string()),
            timeout_milliseconds: 200,
        },
        notifications: NotificationSettings::default(),
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    let backend_server = MockServer::start().await;
    let app = Application::build(test_settings(backend_server.uri()), site_page());
    assert!(app.backend().is_ready());

    TestApp {
        app,
        backend_server,
    }
}
