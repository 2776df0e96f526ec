use crate::models::LeadRecord;
use async_trait::async_trait;

/// Shown when the CRM rejects a lead without saying why.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to submit inquiry. Please try again.";

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The CRM accepted the lead.
    Success,

    /// The CRM answered but did not accept the lead.
    Failure(String),

    /// No usable answer: connection, DNS, timeout, or an internal fault.
    NetworkError,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Rejection with the CRM's reason, or the fallback text when it gave none.
    pub fn failure(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            Self::Failure(FALLBACK_FAILURE_MESSAGE.to_string())
        } else {
            Self::Failure(reason)
        }
    }
}

/// Sends leads somewhere that can accept or reject them.
///
/// Implementations make exactly one attempt per call and never retry or
/// deduplicate: two calls with the same lead create two records.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome;
}
