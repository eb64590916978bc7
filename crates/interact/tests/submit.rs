use scholarfolio_interact::{Document, Settings, SubmitError, Variant};

mod helpers;

fn fill_in(fixture: &helpers::Fixture) {
    fixture.doc.set_value(&fixture.name, "Ada Lovelace");
    fixture.doc.set_value(&fixture.email, "ada@uni.edu");
    fixture.doc.set_value(&fixture.subject, "Guest lecture");
    fixture.doc.set_value(&fixture.message, "Would you speak to our seminar?");
}

#[test]
fn test_submit_disables_button_once_and_restores_it() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    let reply = fixture.transport.expect();

    assert!(fixture.doc.submit(&fixture.form));
    fixture.doc.run_until_stalled();

    assert!(fixture.doc.is_disabled(&fixture.submit));
    assert!(fixture.doc.inner_html(&fixture.submit).contains("Sending..."));

    // a second submit while the first is pending is ignored
    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();
    assert_eq!(fixture.transport.requests().len(), 1);
    assert_eq!(fixture.submit.times_disabled(), 1);

    let _ = reply.send(Ok(r#"{"success":true,"message":"Thanks"}"#.to_owned()));
    fixture.doc.run_until_stalled();

    assert!(!fixture.doc.is_disabled(&fixture.submit));
    assert_eq!(fixture.doc.inner_html(&fixture.submit), "Send Message");

    Ok(())
}

#[test]
fn test_successful_submission_notifies_resets_and_scrolls() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture
        .transport
        .respond_with(Ok(r#"{"success":true,"message":"Thanks"}"#.to_owned()));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    let requests = fixture.transport.requests();
    assert_eq!(requests.len(), 1);
    let (endpoint, payload) = &requests[0];
    assert_eq!(endpoint, "/send-email");
    assert_eq!(payload.get("name"), Some("Ada Lovelace"));
    assert_eq!(payload.get("email"), Some("ada@uni.edu"));
    assert_eq!(payload.get("subject"), Some("Guest lecture"));
    assert_eq!(payload.get("message"), Some("Would you speak to our seminar?"));
    assert_eq!(payload.get("responseMethod"), Some("email"));

    let notifications = fixture.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        fixture.doc.attribute(&notifications[0], "data-variant").as_deref(),
        Some(Variant::Success.as_ref())
    );
    assert!(fixture.notification_html().contains("Success! Thanks"));

    assert_eq!(fixture.doc.value(&fixture.name), "");
    assert_eq!(fixture.doc.value(&fixture.email), "");
    assert_eq!(fixture.doc.value(&fixture.subject), "");
    assert_eq!(fixture.doc.value(&fixture.message), "");
    assert_eq!(fixture.doc.scroll_to_top_calls(), 1);

    Ok(())
}

#[test]
fn test_transport_failure_offers_fallback_email() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture
        .transport
        .respond_with(Err(SubmitError::Transport("network unreachable".to_owned())));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    let html = fixture.notification_html();
    assert!(html.contains("Failed to send message"));
    assert!(html.contains(&Settings::default().fallback_email));
    assert!(!fixture.doc.is_disabled(&fixture.submit));
    assert_eq!(fixture.doc.inner_html(&fixture.submit), "Send Message");

    // the visitor keeps what they typed
    assert_eq!(fixture.doc.value(&fixture.name), "Ada Lovelace");
    assert_eq!(fixture.doc.scroll_to_top_calls(), 0);

    Ok(())
}

#[test]
fn test_declared_failure_is_reported_as_error() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture.transport.respond_with(Ok(
        r#"{"success":false,"message":"Please fill all required fields"}"#.to_owned(),
    ));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    let notifications = fixture.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        fixture.doc.attribute(&notifications[0], "data-variant").as_deref(),
        Some("error")
    );
    assert!(fixture.notification_html().contains("Failed to send message"));
    assert!(!fixture.doc.is_disabled(&fixture.submit));

    Ok(())
}

#[test]
fn test_non_json_response_is_reported_as_error() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fixture
        .transport
        .respond_with(Ok("<html><body>502 Bad Gateway</body></html>".to_owned()));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    assert!(fixture.notification_html().contains("Failed to send message"));
    assert!(!fixture.doc.is_disabled(&fixture.submit));

    Ok(())
}

#[test]
fn test_configured_endpoint_and_fallback_email_are_used() -> anyhow::Result<()> {
    let fixture = helpers::setup_page_with(Settings {
        endpoint: "/api/inquiries".to_owned(),
        fallback_email: "prof.lee@uni.edu".to_owned(),
        ..Settings::default()
    })?;
    fixture
        .transport
        .respond_with(Err(SubmitError::Transport("timeout".to_owned())));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    assert_eq!(fixture.transport.requests()[0].0, "/api/inquiries");
    assert!(fixture.notification_html().contains("prof.lee@uni.edu"));

    Ok(())
}

#[test]
fn test_submit_prevents_page_navigation() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fixture.transport.respond_with(Ok(r#"{"success":true}"#.to_owned()));

    assert!(fixture.doc.submit(&fixture.form));
    fixture.doc.run_until_stalled();

    assert!(fixture.notification_html().contains("Your message has been sent"));

    Ok(())
}

#[test]
fn test_rendered_fields_are_sent_and_cleared_on_success() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture.doc.change_value(&fixture.inquiry_type, "teaching");
    fixture.add_dynamic_control("select", "eventType", "workshop");
    fixture.add_dynamic_control("input", "audienceSize", "40");
    fixture
        .transport
        .respond_with(Ok(r#"{"success":true,"message":"Thanks"}"#.to_owned()));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    let (_, payload) = &fixture.transport.requests()[0];
    assert_eq!(payload.get("inquiryType"), Some("teaching"));
    assert_eq!(payload.get("eventType"), Some("workshop"));
    assert_eq!(payload.get("audienceSize"), Some("40"));

    assert_eq!(fixture.doc.value(&fixture.inquiry_type), "");
    assert!(fixture.dynamic_fields.children().is_empty());
    assert_eq!(fixture.doc.inner_html(&fixture.dynamic_fields), "");

    Ok(())
}

#[test]
fn test_reset_hides_phone_field_with_email_checked() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture.doc.check(&fixture.by_phone);
    assert!(!fixture.doc.has_class(&fixture.phone_field, "hidden"));
    fixture
        .transport
        .respond_with(Ok(r#"{"success":true}"#.to_owned()));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    assert_eq!(
        fixture.transport.requests()[0].1.get("responseMethod"),
        Some("phone")
    );
    assert!(fixture.doc.is_checked(&fixture.by_email));
    assert!(!fixture.doc.is_checked(&fixture.by_phone));
    assert!(fixture.doc.has_class(&fixture.phone_field, "hidden"));

    Ok(())
}

#[test]
fn test_failed_submission_keeps_rendered_fields() -> anyhow::Result<()> {
    let fixture = helpers::setup_page()?;
    fill_in(&fixture);
    fixture.doc.change_value(&fixture.inquiry_type, "mentorship");
    fixture.add_dynamic_control("select", "currentLevel", "phd");
    fixture
        .transport
        .respond_with(Err(SubmitError::Transport("offline".to_owned())));

    fixture.doc.submit(&fixture.form);
    fixture.doc.run_until_stalled();

    assert_eq!(fixture.doc.value(&fixture.inquiry_type), "mentorship");
    assert_eq!(fixture.dynamic_fields.children().len(), 1);

    Ok(())
}
