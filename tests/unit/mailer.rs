use super::*;

#[test]
fn resend_mailer_needs_an_api_key() {
    let cfg = SiteConfig::default();
    assert!(matches!(ResendMailer::from_config(&cfg), Err(MailError::MissingApiKey)));

    let cfg = SiteConfig { api_key: Some("re_test".into()), ..SiteConfig::default() };
    let mailer = ResendMailer::from_config(&cfg).unwrap();
    assert_eq!(mailer.name(), "resend");
    assert_eq!(mailer.endpoint, "https://api.resend.com/emails");
}

#[test]
fn email_payload_has_a_single_recipient_list() {
    let e = Email::new("A <a@x.io>", "b@y.io", "Hi", "<p>x</p>");
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["to"], serde_json::json!(["b@y.io"]));
    assert_eq!(v["subject"], "Hi");
}

#[test]
fn log_mailer_always_succeeds() {
    let e = Email::new("a@x.io", "b@y.io", "s", "h");
    assert!(LogMailer.send(&e).is_ok());
}

#[test]
fn provider_errors_carry_status_and_body() {
    let err = MailError::Provider { status: 422, body: "invalid from".into() };
    let msg = err.to_string();
    assert!(msg.contains("422"));
    assert!(msg.contains("invalid from"));
}
