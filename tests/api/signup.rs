use anyhow::Result;
use fake::{faker::internet::en::SafeEmail, Fake};
use formwire::{
    form::SurfaceEvent, AnalyticsEvent, FormSpec, FormSurface, MessageStyle, Outcome,
    SubmissionState, SubmitError,
};
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::spawn_form;

const SIGNUP_SUCCESS: &str =
    "Thank you! Please check your email for a confirmation link to complete your subscription.";

#[tokio::test]
async fn signup_ok() -> Result<()> {
    let mut form = spawn_form(FormSpec::signup(), &[("email", "a@b.com")]).await?;

    Mock::given(path("/signup"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "email": "a@b.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&form.api_server)
        .await;

    let outcome = form.controller.submit().await;

    assert_eq!(outcome, Some(Outcome::Success(json!({}))));
    assert_eq!(form.controller.state(), SubmissionState::Succeeded);
    assert_eq!(form.surface().message(), Some(SIGNUP_SUCCESS));
    assert_eq!(form.surface().message_style(), Some(MessageStyle::Success));
    assert_eq!(form.surface().field_value("email"), "");
    assert!(form.surface().submit_enabled());
    assert_eq!(form.surface().submit_label(), "Start My Journey");

    Ok(())
}

#[tokio::test]
async fn signup_trims_email_before_sending() -> Result<()> {
    let email: String = SafeEmail().fake();
    let padded = format!("   {email}\t");
    let mut form = spawn_form(FormSpec::signup(), &[("email", padded.as_str())]).await?;

    Mock::given(body_json(json!({ "email": email })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&form.api_server)
        .await;

    let outcome = form.controller.submit().await;
    assert_eq!(outcome, Some(Outcome::Success(json!({ "id": 1 }))));

    Ok(())
}

#[tokio::test]
async fn signup_empty_email_sends_nothing() -> Result<()> {
    for input in ["", "   ", "\n\t"] {
        let mut form = spawn_form(FormSpec::signup(), &[("email", input)]).await?;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&form.api_server)
            .await;

        let outcome = form.controller.submit().await;

        assert_eq!(
            outcome,
            Some(Outcome::Failure(SubmitError::ValidationFailed {
                field: "email".to_string()
            })),
            "Wrong outcome for input: {input:?}"
        );
        assert_eq!(
            form.surface().message(),
            Some("Please enter a valid email address.")
        );
        assert_eq!(form.surface().message_style(), Some(MessageStyle::Error));
        assert_eq!(form.controller.state(), SubmissionState::Failed);
        assert!(form.received().await.is_empty());
        // Local failures never touch the submit control.
        assert!(!form
            .journal()
            .iter()
            .any(|ev| matches!(ev, SurfaceEvent::SubmitEnabled(_))));
    }

    Ok(())
}

#[tokio::test]
async fn signup_server_error_keeps_email() -> Result<()> {
    let mut form = spawn_form(FormSpec::signup(), &[("email", "a@b.com")]).await?;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "already subscribed" })),
        )
        .expect(1)
        .mount(&form.api_server)
        .await;

    let outcome = form.controller.submit().await;

    assert_eq!(
        outcome,
        Some(Outcome::Failure(SubmitError::Http {
            status: 409,
            message: "already subscribed".to_string()
        }))
    );
    assert_eq!(form.surface().message(), Some("Error: already subscribed"));
    assert_eq!(form.surface().message_style(), Some(MessageStyle::Error));
    assert_eq!(form.surface().field_value("email"), "a@b.com");
    assert!(form.surface().submit_enabled());

    Ok(())
}

#[tokio::test]
async fn signup_unreadable_error_body_uses_generic_message() -> Result<()> {
    let mut form = spawn_form(FormSpec::signup(), &[("email", "a@b.com")]).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&form.api_server)
        .await;

    form.controller.submit().await;

    assert_eq!(
        form.surface().message(),
        Some("Error: An unknown error occurred.")
    );

    Ok(())
}

#[tokio::test]
async fn signup_success_reports_analytics_once() -> Result<()> {
    let mut form = spawn_form(FormSpec::signup(), &[("email", "a@b.com")]).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&form.api_server)
        .await;

    form.controller.submit().await;

    assert_eq!(form.analytics.events(), vec![AnalyticsEvent::sign_up()]);

    Ok(())
}

#[tokio::test]
async fn signup_failure_reports_no_analytics() -> Result<()> {
    let mut form = spawn_form(FormSpec::signup(), &[("email", "a@b.com")]).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "nope" })))
        .expect(1)
        .mount(&form.api_server)
        .await;

    form.controller.submit().await;

    assert!(form.analytics.events().is_empty());

    Ok(())
}
