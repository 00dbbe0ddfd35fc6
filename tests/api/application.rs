use crate::helpers::{CONTACT_FORM_ID, CONTACT_LABEL, site_page, spawn_app, test_settings};
use claims::{assert_matches, assert_none, assert_ok};
use site_forms::constants::ERROR_SOMETHING_WENT_WRONG;
use site_forms::coordinator::Outcome;
use site_forms::startup::Application;
use site_forms::ui::{FORM_MARKER_ATTRIBUTE, FormElement};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn every_marked_form_gets_a_coordinator() {
    let test_app = spawn_app().await;
    let events = test_app.app.events();
    assert_eq!(events.listener_count("contactForm"), 1);
    assert_eq!(events.listener_count("newsletterForm"), 1);
}

#[tokio::test]
async fn application_reads_the_shipped_configuration() {
    // Integration tests run from the package root, next to `configuration/`
    let app = assert_ok!(Application::from_environment(site_page()));

    assert_eq!(app.events().listener_count("contactForm"), 1);
    assert_eq!(app.events().listener_count("newsletterForm"), 1);
}

#[tokio::test]
async fn forms_with_unknown_markers_are_left_alone() {
    let page = site_page().with_form(
        FormElement::builder("searchForm")
            .attribute(FORM_MARKER_ATTRIBUTE, "search")
            .build(),
    );
    let app = Application::build(test_settings("http://127.0.0.1:9".into()), page);

    assert_none!(app.submit("searchForm").await);
    assert_none!(app.submit("doesNotExist").await);
}

#[tokio::test]
async fn placeholder_configuration_leaves_the_backend_unconfigured() {
    let app = Application::build(test_settings("YOUR_SUPABASE_URL".into()), site_page());
    assert!(!app.backend().is_ready());

    let form = app.page().form(CONTACT_FORM_ID).unwrap();
    form.set_value("name", "le guin");
    form.set_value("email", "ursula_le_guin@gmail.com");
    form.set_value("message", "Hello!");
    let outcome = app.submit(CONTACT_FORM_ID).await.unwrap();

    assert_eq!(
        outcome.notice().map(|n| n.message.as_str()),
        Some(ERROR_SOMETHING_WENT_WRONG)
    );
    assert_eq!(form.submit_button().label(), CONTACT_LABEL);
}

#[tokio::test]
async fn dispose_tears_down_the_backend_connection() {
    let test_app = spawn_app().await;
    let backend = test_app.app.backend().clone();
    assert!(backend.is_ready());

    test_app.app.dispose();

    assert!(!backend.is_ready());
}

#[tokio::test]
async fn disposed_backend_fails_submissions_without_network_io() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test_app.backend_server)
        .await;
    test_app.fill_contact_form("le guin", "ursula_le_guin@gmail.com", "Hello!");
    test_app.app.backend().dispose();

    // Act
    let outcome = test_app.submit_contact().await;

    // Assert
    assert_matches!(outcome, Outcome::Fatal(_));
    let form = test_app.contact_form();
    assert!(!form.submit_button().is_disabled());
    assert_eq!(form.submit_button().label(), CONTACT_LABEL);
}
