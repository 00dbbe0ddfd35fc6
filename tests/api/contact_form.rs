use crate::helpers::{
    ACCESS_TOKEN, CONTACT_FORM_ID, CONTACT_LABEL, site_page, spawn_app, test_settings,
};
use claims::assert_matches;
use site_forms::constants::ERROR_SOMETHING_WENT_WRONG;
use site_forms::coordinator::Outcome;
use site_forms::domain::{EMAIL_FIELD, MESSAGE_FIELD, NAME_FIELD};
use site_forms::notifications::BannerKind;
use site_forms::startup::Application;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn contact_form_persists_the_message() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .and(method("POST"))
        .and(header("apikey", ACCESS_TOKEN))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([{"id": 7}])))
        .expect(1)
        .mount(&test_app.backend_server)
        .await;
    test_app.fill_contact_form("le guin", "ursula_le_guin@gmail.com", "  Hello!  ");

    // Act
    let outcome = test_app.submit_contact().await;

    // Assert
    assert_matches!(outcome, Outcome::Success(_));
    let requests = test_app.backend_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body[0]["name"], "le guin");
    assert_eq!(body[0]["email"], "ursula_le_guin@gmail.com");
    assert_eq!(body[0]["message"], "Hello!");
    let created_at = body[0]["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn successful_contact_resets_the_form_and_shows_the_sent_indicator() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
        .mount(&test_app.backend_server)
        .await;
    test_app.fill_contact_form("le guin", "ursula_le_guin@gmail.com", "Hello!");

    // Act
    test_app.submit_contact().await;

    // Assert
    let form = test_app.contact_form();
    for key in [NAME_FIELD, EMAIL_FIELD, MESSAGE_FIELD] {
        assert_eq!(form.value(key).as_deref(), Some(""), "{} was not cleared", key);
    }
    assert!(form.sent_indicator().unwrap().is_visible());
    let banners = form.banner_container().banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].kind, BannerKind::Success);
    assert_eq!(form.submit_button().label(), CONTACT_LABEL);
    assert!(!form.submit_button().is_disabled());
}

#[tokio::test]
async fn contact_form_with_missing_data_is_not_sent() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test_app.backend_server)
        .await;
    let test_cases = vec![
        ("", "ursula_le_guin@gmail.com", "Hello!", "missing the name"),
        ("le guin", "", "Hello!", "missing the email"),
        ("le guin", "ursula_le_guin@gmail.com", "   ", "blank message"),
        ("le guin", "ursula_le_guin@localhost", "Hello!", "email without a dot"),
    ];

    for (name, email, message, description) in test_cases {
        // Act
        test_app.fill_contact_form(name, email, message);
        let outcome = test_app.submit_contact().await;

        // Assert
        assert!(
            matches!(outcome, Outcome::Invalid(_)),
            "The submission was not blocked when the payload was {}.",
            description
        );
    }
    assert!(test_app.contact_form().banner_container().is_empty());
}

#[tokio::test]
async fn backend_failure_shows_its_message_and_keeps_the_input() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "23502",
            "message": "null value in column \"name\" violates not-null constraint"
        })))
        .expect(1)
        .mount(&test_app.backend_server)
        .await;
    test_app.fill_contact_form("le guin", "ursula_le_guin@gmail.com", "Hello!");

    // Act
    let outcome = test_app.submit_contact().await;

    // Assert
    assert_matches!(outcome, Outcome::Recoverable(_));
    let form = test_app.contact_form();
    let banners = form.banner_container().banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].kind, BannerKind::Error);
    assert!(banners[0].message.contains("violates not-null constraint"));
    assert_eq!(form.value(MESSAGE_FIELD).as_deref(), Some("Hello!"));
    assert!(!form.sent_indicator().unwrap().is_visible());
}

#[tokio::test]
async fn slow_backend_is_reported_as_a_generic_failure() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201).set_delay(std::time::Duration::from_secs(180)))
        .mount(&test_app.backend_server)
        .await;
    test_app.fill_contact_form("le guin", "ursula_le_guin@gmail.com", "Hello!");

    // Act
    let outcome = test_app.submit_contact().await;

    // Assert
    assert_matches!(outcome, Outcome::Fatal(_));
    let form = test_app.contact_form();
    assert_eq!(form.submit_button().label(), CONTACT_LABEL);
    assert!(!form.submit_button().is_disabled());
}

#[tokio::test]
async fn unreachable_backend_is_reported_as_a_generic_failure() {
    // Arrange: nothing listens on the discard port
    let app = Application::build(test_settings("http://127.0.0.1:9".into()), site_page());
    assert!(app.backend().is_ready());
    let form = app.page().form(CONTACT_FORM_ID).unwrap();
    form.set_value(NAME_FIELD, "le guin");
    form.set_value(EMAIL_FIELD, "ursula_le_guin@gmail.com");
    form.set_value(MESSAGE_FIELD, "Hello!");

    // Act
    let outcome = app.submit(CONTACT_FORM_ID).await.unwrap();

    // Assert
    assert_eq!(
        outcome.notice().map(|n| n.message.as_str()),
        Some(ERROR_SOMETHING_WENT_WRONG)
    );
    assert_matches!(outcome, Outcome::Fatal(_));
    assert!(!form.submit_button().is_disabled());
    assert_eq!(form.submit_button().label(), CONTACT_LABEL);
    assert_eq!(form.value(MESSAGE_FIELD).as_deref(), Some("Hello!"));
}
