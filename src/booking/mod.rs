// Booking submissions: validate the form, notify the agency inbox and, when
// the client left an email address, send them a confirmation.
//
// [`handle_booking`] is transport-agnostic. It takes the raw JSON body and
// returns a status code plus JSON body, the same contract as the site's
// `POST /api/send` route.

pub mod mailer;
pub mod modal;
pub mod template;

use crate::config::SiteConfig;
use crate::error::Result;
use chrono::NaiveDate;
use mailer::{Email, Mailer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use template::BookingSummary;
use tracing::{error, info, warn};

pub const MSG_MISSING_FIELDS: &str = "Missing required fields.";
pub const MSG_INVALID_BODY: &str = "Invalid request body.";
pub const MSG_SEND_FAILED: &str = "Failed to send email. Please try again.";
pub const CONFIRMATION_SUBJECT: &str = "Booking Confirmed - Myra Keleher Cleaning Agency";

/// Service codes offered in the booking form, with their display labels.
pub const SERVICES: [(&str, &str); 8] = [
    ("sanctuary-restoration", "Sanctuary Restoration"),
    ("post-construction", "Post Construction Cleaning"),
    ("fumigation-pest-control", "Fumigation & Pest Control"),
    ("residential-office", "Residential / Office Cleaning"),
    ("deep-cleaning", "Deep Cleaning"),
    ("carpet-cleaning", "Carpet Cleaning"),
    ("move-in-out", "Move-In / Move-Out"),
    ("others", "Others / General Enquiry"),
];

/// Display label for a service code; unknown codes pass through unchanged.
pub fn service_label(code: &str) -> &str {
    SERVICES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// `local@domain.tld` shape check: exactly one `@`, no whitespace, a non-empty
/// local part, and a dot inside the domain with something on both sides.
pub fn is_email(contact: &str) -> bool {
    if contact.chars().any(char::is_whitespace) { return false; }
    let Some((local, domain)) = contact.split_once('@') else { return false };
    if local.is_empty() || domain.contains('@') { return false; }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// "March 4, 2026".
pub fn format_submitted(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// The form as posted. Every field is optional on the wire; presence is
/// checked by [`BookingRequest::validate`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub service: Option<String>,
    pub details: Option<String>,
}

/// A submission with all required fields present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidBooking<'a> {
    pub name: &'a str,
    pub contact: &'a str,
    pub service: &'a str,
    pub details: Option<&'a str>,
}

pub(crate) fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl BookingRequest {
    /// `None` when name, contact or service is missing or blank.
    pub fn validate(&self) -> Option<ValidBooking<'_>> {
        Some(ValidBooking {
            name: present(&self.name)?,
            contact: present(&self.contact)?,
            service: present(&self.service)?,
            details: present(&self.details),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingResponse {
    pub status: u16,
    pub body: Value,
}

impl BookingResponse {
    pub fn ok() -> Self {
        Self { status: 200, body: json!({ "success": true }) }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Handle one submission end to end.
///
/// 400 for a malformed body or missing fields (nothing is sent), 500 if either
/// send fails (no retry, and the caller is not told which one), 200 otherwise.
pub fn handle_booking(
    body: &str,
    mailer: &dyn Mailer,
    cfg: &SiteConfig,
    today: NaiveDate,
) -> BookingResponse {
    let request: BookingRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "rejecting malformed booking body");
            return BookingResponse::error(400, MSG_INVALID_BODY);
        }
    };
    let Some(booking) = request.validate() else {
        warn!("rejecting booking with missing fields");
        return BookingResponse::error(400, MSG_MISSING_FIELDS);
    };

    match deliver(&booking, mailer, cfg, today) {
        Ok(sent) => {
            info!(service = booking.service, sent, mailer = mailer.name(), "booking processed");
            BookingResponse::ok()
        }
        Err(e) => {
            error!(error = %e, mailer = mailer.name(), "booking email failed");
            BookingResponse::error(500, MSG_SEND_FAILED)
        }
    }
}

/// Notification first, then the optional confirmation. Returns how many
/// messages went out.
fn deliver(b: &ValidBooking<'_>, mailer: &dyn Mailer, cfg: &SiteConfig, today: NaiveDate) -> Result<usize> {
    let label = service_label(b.service);
    let submitted_at = format_submitted(today);
    let summary = BookingSummary {
        client_name: b.name,
        contact: b.contact,
        service_label: label,
        details: b.details,
        submitted_at: &submitted_at,
        base_url: &cfg.base_url,
    };

    let notification = Email::new(
        &cfg.notification_from,
        &cfg.notify_email,
        format!("New Booking Request - {label} from {}", b.name),
        template::notification_html(&summary),
    );
    mailer.send(&notification)?;

    if !is_email(b.contact) {
        return Ok(1);
    }
    let confirmation = Email::new(
        &cfg.confirmation_from,
        b.contact,
        CONFIRMATION_SUBJECT,
        template::confirmation_html(&summary),
    );
    mailer.send(&confirmation)?;
    Ok(2)
}

#[cfg(test)]
#[path = "../../tests/unit/booking.rs"]
mod tests;
