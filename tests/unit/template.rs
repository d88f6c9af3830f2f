use super::*;

fn summary<'a>(details: Option<&'a str>) -> BookingSummary<'a> {
    BookingSummary {
        client_name: "Ana",
        contact: "ana@example.com",
        service_label: "Fumigation & Pest Control",
        details,
        submitted_at: "March 4, 2026",
        base_url: "https://myrakelehercleaning.com/",
    }
}

#[test]
fn escaping_borrows_clean_input() {
    assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    assert_eq!(escape_html(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
}

#[test]
fn notification_lists_every_field_and_dashes_missing_notes() {
    let html = notification_html(&summary(None));
    for needle in ["Name", "Ana", "Contact", "ana@example.com", "Fumigation &amp; Pest Control", "March 4, 2026", "&mdash;"] {
        assert!(html.contains(needle), "missing {needle}");
    }

    let html = notification_html(&summary(Some("gate code 12")));
    assert!(html.contains("gate code 12"));
    assert!(!html.contains("&mdash;"));
}

#[test]
fn confirmation_carries_receipt_cta_and_footer() {
    let html = confirmation_html(&summary(None));
    assert!(html.contains("BOOKING CONFIRMED"));
    assert!(html.contains("Hello Ana, your service request has been logged"));
    assert!(html.contains("&#9679; Processing"));
    assert!(html.contains("VIEW BOOKING STATUS"));
    assert!(html.contains(r#"src="https://myrakelehercleaning.com/images/logo.png""#));
    assert!(html.contains(r#"href="https://myrakelehercleaning.com""#));
    assert!(html.contains(FOOTER_LINE));
    assert!(!html.contains(">Notes<"));
}

#[test]
fn confirmation_shows_notes_only_when_given() {
    let html = confirmation_html(&summary(Some("two dogs")));
    assert!(html.contains(">Notes<"));
    assert!(html.contains("two dogs"));
}

#[test]
fn user_values_cannot_inject_markup() {
    let mut s = summary(Some("<script>alert(1)</script>"));
    s.client_name = "<img onerror=x>";
    for html in [notification_html(&s), confirmation_html(&s)] {
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img onerror"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
