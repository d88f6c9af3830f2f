// HTML bodies for the two booking emails.
// Inline styles only; mail clients drop <style> blocks.
// Every value that came from the form is escaped before it is interpolated.

use std::borrow::Cow;

const GREEN: &str = "#55A53B";
const BG: &str = "#050505";
const CARD: &str = "#0f0f0f";
const BORDER: &str = "rgba(255,255,255,0.08)";
const RULE: &str = "rgba(255,255,255,0.06)";
const MONO: &str = "ui-monospace, monospace";

pub const FOOTER_LINE: &str = "MYRA KELEHER CLEANING AGENCY &middot; FLORIDA STATEWIDE";

/// Everything both templates need about one submission.
#[derive(Clone, Copy, Debug)]
pub struct BookingSummary<'a> {
    pub client_name: &'a str,
    pub contact: &'a str,
    pub service_label: &'a str,
    /// Free-text notes; `None` when the form left them empty.
    pub details: Option<&'a str>,
    /// Already formatted, e.g. "March 4, 2026".
    pub submitted_at: &'a str,
    pub base_url: &'a str,
}

/// Escape the five HTML-significant characters. Borrows when nothing changes.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Internal notification: dark card with a five-row table.
pub fn notification_html(b: &BookingSummary<'_>) -> String {
    let label = "color:#555;font-size:11px;padding:10px 0;text-transform:uppercase;letter-spacing:0.1em;";
    let cell = "font-size:13px;padding:10px 0;";
    let line = format!("border-bottom:1px solid {RULE};");

    let mut rows = String::new();
    let mut row = |name: &str, value: &str, value_style: &str, last: bool| {
        let sep = if last { "" } else { line.as_str() };
        rows.push_str(&format!(
            r#"<tr><td style="{label}{sep}vertical-align:top;">{name}</td><td style="{value_style}{sep}">{value}</td></tr>"#
        ));
    };
    row("Name", &escape_html(b.client_name), &format!("color:#f2f2f2;{cell}"), false);
    row("Contact", &escape_html(b.contact), &format!("color:#f2f2f2;{cell}"), false);
    row("Service", &escape_html(b.service_label), &format!("color:{GREEN};{cell}font-weight:700;"), false);
    row("Date", &escape_html(b.submitted_at), &format!("color:#f2f2f2;{cell}"), false);
    let notes = b.details.map(escape_html).unwrap_or(Cow::Borrowed("&mdash;"));
    row("Notes", &notes, "color:#a0a0a0;font-size:12px;padding:10px 0;line-height:1.5;", true);

    format!(
        r#"<div style="font-family:monospace;background:{BG};color:#f2f2f2;padding:32px;border-radius:12px;max-width:600px;margin:0 auto;">
<p style="color:{GREEN};font-size:11px;letter-spacing:0.3em;text-transform:uppercase;margin:0 0 16px;">&#9679; New Booking Request</p>
<h2 style="font-size:22px;font-weight:800;margin:0 0 24px;letter-spacing:-0.02em;">New Enquiry Received</h2>
<table style="width:100%;border-collapse:collapse;">{rows}</table>
</div>"#
    )
}

fn receipt_row(out: &mut String, name: &str, value: &str, value_color: &str, bold: bool) {
    let weight = if bold { "font-weight:700;" } else { "" };
    out.push_str(&format!(
        r#"<tr><td style="width:40%;padding:12px 0;border-bottom:1px solid {RULE};color:#555;font-size:11px;font-family:{MONO};letter-spacing:0.1em;text-transform:uppercase;vertical-align:top;">{name}</td><td style="padding:12px 0;border-bottom:1px solid {RULE};color:{value_color};font-size:13px;font-family:{MONO};{weight}">{value}</td></tr>"#
    ));
}

/// Client confirmation. The notes row only appears when notes were given.
pub fn confirmation_html(b: &BookingSummary<'_>) -> String {
    let name = escape_html(b.client_name);
    let base = escape_html(b.base_url.trim_end_matches('/'));

    let mut receipt = String::new();
    receipt_row(&mut receipt, "Service", &escape_html(b.service_label), "#f2f2f2", false);
    receipt_row(&mut receipt, "Contact", &escape_html(b.contact), "#f2f2f2", false);
    receipt_row(&mut receipt, "Submitted", &escape_html(b.submitted_at), "#f2f2f2", false);
    receipt_row(&mut receipt, "Status", "&#9679; Processing", GREEN, true);
    if let Some(details) = b.details {
        receipt_row(&mut receipt, "Notes", &escape_html(details), "#a0a0a0", false);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Booking Confirmed</title></head>
<body style="background-color:{BG};margin:0;padding:0;font-family:ui-sans-serif, system-ui, sans-serif;">
<div style="max-width:600px;margin:0 auto;padding:40px 20px;">
<div style="text-align:center;padding-bottom:24px;"><img src="{base}/images/logo.png" alt="Myra Keleher" width="140" style="margin:0 auto;display:block;"></div>
<hr style="border-color:{GREEN};border-width:1.5px;margin:0 0 32px 0;">
<div style="background-color:{CARD};border:1px solid {BORDER};border-radius:16px;padding:40px 36px;">
<p style="color:{GREEN};font-size:10px;font-family:{MONO};letter-spacing:0.35em;text-transform:uppercase;margin:0 0 12px 0;">&#9679; Protocol Initiated</p>
<h1 style="color:#f2f2f2;font-size:28px;font-weight:800;letter-spacing:-0.03em;margin:0 0 8px 0;line-height:1.2;">BOOKING CONFIRMED</h1>
<p style="color:#a0a0a0;font-size:14px;line-height:1.6;margin:0 0 32px 0;">Hello {name}, your service request has been logged within our system. Our team will reach out within 24 hours to confirm your appointment details.</p>
<div style="background-color:rgba(255,255,255,0.04);border:1px solid {BORDER};border-radius:12px;padding:24px;margin-bottom:32px;">
<p style="color:#555;font-size:9px;font-family:{MONO};letter-spacing:0.3em;text-transform:uppercase;margin:0 0 16px 0;">Booking Receipt</p>
<table style="width:100%;border-collapse:collapse;">{receipt}</table>
</div>
<div style="text-align:center;margin-bottom:32px;"><a href="{base}" style="background-color:{GREEN};color:#ffffff;font-size:12px;font-weight:700;font-family:{MONO};letter-spacing:0.2em;text-transform:uppercase;text-decoration:none;padding:14px 32px;border-radius:9999px;display:inline-block;">VIEW BOOKING STATUS</a></div>
<p style="color:#555;font-size:12px;line-height:1.6;margin:0;text-align:center;">Questions? Reply to this email or reach us directly. We will never keep you waiting.</p>
</div>
<div style="text-align:center;padding:32px 0 0 0;">
<hr style="border-color:{RULE};margin:0 0 20px 0;">
<p style="color:#3a3a3a;font-size:11px;font-family:{MONO};letter-spacing:0.15em;margin:0 0 10px 0;">{FOOTER_LINE}</p>
<p style="margin:0 0 16px 0;"><a href="{base}" style="color:#555;font-size:11px;text-decoration:none;">Website</a></p>
</div>
</div>
</body>
</html>"#
    )
}

#[cfg(test)]
#[path = "../../tests/unit/template.rs"]
mod tests;
