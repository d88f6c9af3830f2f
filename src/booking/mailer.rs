// Outgoing mail: the [`Mailer`] seam plus the Resend HTTP implementation.

use crate::config::SiteConfig;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("mail provider rejected the message ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("no mail API key configured (set RESEND_API_KEY)")]
    MissingApiKey,
}

/// One message as handed to the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl Email {
    pub fn new(from: &str, to: &str, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            from: from.to_owned(),
            to: vec![to.to_owned()],
            subject: subject.into(),
            html: html.into(),
        }
    }
}

pub trait Mailer {
    fn name(&self) -> &'static str;

    fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Sends through the Resend REST API (`POST /emails`, bearer auth).
pub struct ResendMailer {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ResendMailer {
    pub fn new(api_key: String, endpoint: String) -> Result<Self, MailError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { api_key, endpoint, client })
    }

    pub fn from_config(cfg: &SiteConfig) -> Result<Self, MailError> {
        let key = cfg.api_key.clone().ok_or(MailError::MissingApiKey)?;
        Self::new(key, cfg.resend_endpoint.clone())
    }
}

impl Mailer for ResendMailer {
    fn name(&self) -> &'static str {
        "resend"
    }

    fn send(&self, email: &Email) -> Result<(), MailError> {
        debug!(to = ?email.to, subject = %email.subject, "sending via resend");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": email.from,
                "to": email.to,
                "subject": email.subject,
                "html": email.html,
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            return Err(MailError::Provider { status: status.as_u16(), body });
        }
        Ok(())
    }
}

/// Logs messages instead of sending them (`book --dry-run`).
#[derive(Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send(&self, email: &Email) -> Result<(), MailError> {
        info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "dry run: email not sent"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mailer.rs"]
mod tests;
