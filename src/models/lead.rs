//! Lead model representing one visitor inquiry.

use crate::domain::{Interest, PhoneNumber};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A validated inquiry ready to be sent to the CRM.
///
/// The phone number is a [`PhoneNumber`], so a `LeadRecord` can never carry
/// a number that failed validation. Optional text fields are `None` when the
/// visitor left them blank.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRecord {
    /// Visitor's name, trimmed and non-empty
    pub name: String,

    /// Email address, if one was entered
    pub email: Option<String>,

    /// Validated phone number
    pub phone: PhoneNumber,

    /// Free-form message, if one was entered
    pub message: Option<String>,

    /// What the visitor is asking about
    pub interested: Interest,
}

impl LeadRecord {
    /// Create a lead with only the mandatory fields.
    ///
    /// Returns `None` if `name` is blank after trimming.
    pub fn new(name: impl Into<String>, phone: PhoneNumber) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            email: None,
            phone,
            message: None,
            interested: Interest::default(),
        })
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_blank(message.into());
        self
    }

    pub fn with_interest(mut self, interested: Interest) -> Self {
        self.interested = interested;
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Request body for the CRM lead endpoint.
///
/// Optional fields go out as empty strings; the CRM treats a missing key
/// and an empty value the same way but rejects `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    /// Normalized 10-digit national number
    pub phone: String,
    pub message: String,
    pub interested: Interest,
    pub source: String,
    pub project: String,
    /// RFC 3339 timestamp, UTC
    pub submitted_at: String,
}

impl CreateLeadRequest {
    /// Build the request body for `lead`, tagged with the site's source and project.
    pub fn from_lead(
        lead: &LeadRecord,
        source: &str,
        project: &str,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone().unwrap_or_default(),
            phone: lead.phone.national_digits().to_string(),
            message: lead.message.clone().unwrap_or_default(),
            interested: lead.interested,
            source: source.to_string(),
            project: project.to_string(),
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
