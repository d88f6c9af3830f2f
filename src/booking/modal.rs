// Booking modal state: Form -> Loading -> Success, then auto-close.
// Time is passed in explicitly; the host calls tick(now) every frame and the
// modal fires whichever deadlines have passed.

use super::{present, BookingRequest};
use std::time::{Duration, Instant};
use tracing::debug;

/// Simulated submit round-trip.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1800);
/// How long the success card stays up before the modal closes itself.
pub const AUTO_CLOSE: Duration = Duration::from_millis(2800);
/// Close animation length; the form is cleared after it.
pub const RESET_DELAY: Duration = Duration::from_millis(400);

pub const NAME_REQUIRED: &str = "Name is required";
pub const CONTACT_REQUIRED: &str = "Contact is required";
pub const SERVICE_REQUIRED: &str = "Please select a service";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Form,
    Loading,
    Success,
}

/// Per-field validation messages shown under the inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub contact: Option<&'static str>,
    pub service: Option<&'static str>,
}

impl FieldErrors {
    pub fn check(form: &BookingRequest) -> Self {
        Self {
            name: present(&form.name).is_none().then_some(NAME_REQUIRED),
            contact: present(&form.contact).is_none().then_some(CONTACT_REQUIRED),
            service: present(&form.service).is_none().then_some(SERVICE_REQUIRED),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact.is_none() && self.service.is_none()
    }
}

#[derive(Debug)]
pub struct BookingModal {
    open: bool,
    phase: Phase,
    form: BookingRequest,
    errors: FieldErrors,
    loading_until: Option<Instant>,
    close_at: Option<Instant>,
    reset_at: Option<Instant>,
}

impl Default for BookingModal {
    fn default() -> Self {
        Self {
            open: false,
            phase: Phase::Form,
            form: BookingRequest::default(),
            errors: FieldErrors::default(),
            loading_until: None,
            close_at: None,
            reset_at: None,
        }
    }
}

impl BookingModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide now; clear the form once the exit animation has played. A submit
    /// still in flight is abandoned along with its auto-close.
    pub fn close(&mut self, now: Instant) {
        if !self.open { return; }
        self.open = false;
        self.loading_until = None;
        self.close_at = None;
        self.reset_at = Some(now + RESET_DELAY);
        debug!(phase = ?self.phase, "booking modal closed");
    }

    /// Keyboard handler; only Escape does anything.
    pub fn key_escape(&mut self, now: Instant) {
        self.close(now);
    }

    /// Try to submit. Returns false (and records field errors) when a required
    /// field is missing; also false when not showing the form.
    pub fn submit(&mut self, form: BookingRequest, now: Instant) -> bool {
        if !self.open || self.phase != Phase::Form { return false; }
        self.errors = FieldErrors::check(&form);
        self.form = form;
        if !self.errors.is_empty() { return false; }
        self.phase = Phase::Loading;
        self.loading_until = Some(now + SUBMIT_DELAY);
        true
    }

    /// Fire every deadline that is due, in order.
    pub fn tick(&mut self, now: Instant) {
        if let Some(done) = self.loading_until.filter(|t| now >= *t) {
            self.loading_until = None;
            self.phase = Phase::Success;
            self.close_at = Some(done + AUTO_CLOSE);
        }
        if let Some(at) = self.close_at.filter(|t| now >= *t) {
            self.close(at);
        }
        if self.reset_at.is_some_and(|t| now >= t) {
            self.reset_at = None;
            self.loading_until = None;
            self.close_at = None;
            self.phase = Phase::Form;
            self.form = BookingRequest::default();
            self.errors = FieldErrors::default();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Last submitted values (kept until the post-close reset).
    pub fn form(&self) -> &BookingRequest {
        &self.form
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modal.rs"]
mod tests;
