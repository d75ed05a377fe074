//! Contact form: validation, the outbound message, and the submit lifecycle.
//!
//! Delivery itself belongs to a hosted email service behind
//! [`MessageDelivery`]. This module owns the state around it:
//!
//! ```text
//! idle ──begin_submit──▶ submitting ──finish_submit(Ok)──▶ idle, form cleared
//!                                  └─finish_submit(Err)─▶ idle, form kept
//! ```
//!
//! `submitting` is reset on every outcome, so a failed attempt can be retried
//! straight away with the same input.

use crate::config::ContactConfig;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("a message is already being sent")]
    AlreadySubmitting,
}

/// Failure reported by the delivery service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// What the visitor typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A message ready for the delivery service, keyed by its template parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "from_name")]
    pub sender_name: String,
    #[serde(rename = "from_email")]
    pub sender_email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "to_email")]
    pub recipient: String,
}

/// Request body for the hosted email service's send endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmailJsRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: &'a OutboundMessage,
}

impl<'a> EmailJsRequest<'a> {
    pub fn new(config: &'a ContactConfig, message: &'a OutboundMessage) -> Self {
        Self {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: message,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Sends one message. Implemented by the host's email-service client.
pub trait MessageDelivery {
    fn send(&mut self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}

/// Delivery that appends each request, one JSON document per line, to a
/// local outbox file for a relay to pick up.
#[derive(Debug, Clone)]
pub struct OutboxDelivery {
    path: PathBuf,
    config: ContactConfig,
}

impl OutboxDelivery {
    pub fn new(path: impl Into<PathBuf>, config: ContactConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

impl MessageDelivery for OutboxDelivery {
    fn send(&mut self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let request = EmailJsRequest::new(&self.config, message);
        let line = serde_json::to_string(&request).map_err(|e| DeliveryError(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DeliveryError(format!("{}: {e}", self.path.display())))?;
        writeln!(file, "{line}").map_err(|e| DeliveryError(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStatus {
    Success,
    Error,
}

/// The toast shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub status: NoticeStatus,
    pub title: String,
    pub description: String,
    /// How long the toast stays up.
    pub duration_ms: u32,
}

impl Notice {
    fn sent() -> Self {
        Self {
            status: NoticeStatus::Success,
            title: "Message sent successfully!".into(),
            description: "Thank you for your message. I'll get back to you within 24 hours.".into(),
            duration_ms: 5000,
        }
    }

    fn failed(recipient: &str) -> Self {
        Self {
            status: NoticeStatus::Error,
            title: "Message failed to send".into(),
            description: format!("Please try again or send an email directly to {recipient}"),
            duration_ms: 7000,
        }
    }
}

/// Check the shape of an address: a local part, `@`, and a dotted domain.
pub fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

impl ContactForm {
    /// Validate and turn the form into an outbound message.
    pub fn to_message(&self, config: &ContactConfig) -> Result<OutboundMessage, ContactError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail(self.email.trim().to_string()));
        }
        let subject = match self.subject.trim() {
            "" => config.default_subject.clone(),
            s => s.to_string(),
        };
        Ok(OutboundMessage {
            sender_name: self.name.trim().to_string(),
            sender_email: self.email.trim().to_string(),
            subject,
            message: self.message.trim().to_string(),
            recipient: config.recipient.clone(),
        })
    }
}

/// The contact page's form state across submit attempts.
#[derive(Debug, Clone)]
pub struct ContactSession {
    pub form: ContactForm,
    config: ContactConfig,
    submitting: bool,
}

impl ContactSession {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            form: ContactForm::default(),
            config,
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and mark the form in flight. The returned message is what
    /// the host hands to the delivery service.
    pub fn begin_submit(&mut self) -> Result<OutboundMessage, ContactError> {
        if self.submitting {
            return Err(ContactError::AlreadySubmitting);
        }
        let message = self.form.to_message(&self.config)?;
        self.submitting = true;
        Ok(message)
    }

    /// Record the delivery outcome. Always leaves the session idle.
    pub fn finish_submit(&mut self, result: Result<(), DeliveryError>) -> Notice {
        self.submitting = false;
        match result {
            Ok(()) => {
                info!("contact message delivered");
                self.form = ContactForm::default();
                Notice::sent()
            }
            Err(err) => {
                error!(%err, "contact message delivery failed");
                Notice::failed(&self.config.recipient)
            }
        }
    }

    /// Run a full attempt against `delivery`.
    pub fn submit<D: MessageDelivery + ?Sized>(&mut self, delivery: &mut D) -> Result<Notice, ContactError> {
        let message = self.begin_submit()?;
        let result = delivery.send(&message);
        Ok(self.finish_submit(result))
    }
}
