use crate::client::AsyncCrmClient;
use crate::error::CrmApiError;
use crate::metrics::Metrics;
use crate::models::LeadRecord;
use crate::submission::traits::{LeadSubmitter, SubmissionOutcome};
use async_trait::async_trait;
use std::sync::Arc;

/// Lead submitter backed by the CRM client.
///
/// Delegates the single HTTP call to the [`AsyncCrmClient`] and folds every
/// error into a [`SubmissionOutcome`]; nothing is propagated to the caller.
pub struct CrmLeadSubmitter {
    client: Arc<dyn AsyncCrmClient>,
    metrics: Metrics,
}

impl CrmLeadSubmitter {
    /// Create a new CrmLeadSubmitter with the given client.
    pub fn new(client: Arc<dyn AsyncCrmClient>) -> Self {
        Self {
            client,
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of a private one.
    pub fn with_metrics(client: Arc<dyn AsyncCrmClient>, metrics: Metrics) -> Self {
        Self { client, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn classify(error: CrmApiError) -> SubmissionOutcome {
        match error {
            CrmApiError::ApiError { status, message } => {
                tracing::warn!("CRM rejected lead with status {}", status);
                SubmissionOutcome::failure(message)
            }
            CrmApiError::Rejected(message) => {
                tracing::warn!("CRM did not accept lead: {}", message);
                SubmissionOutcome::failure(message)
            }
            transport => {
                tracing::error!("Lead submission failed: {}", transport);
                SubmissionOutcome::NetworkError
            }
        }
    }
}

#[async_trait]
impl LeadSubmitter for CrmLeadSubmitter {
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome {
        tracing::debug!(
            "Submitting lead for {} (interest: {})",
            lead.phone.masked(),
            lead.interested
        );

        let outcome = match self.client.create_lead(lead).await {
            Ok(ack) => {
                tracing::info!(
                    "Lead accepted{}",
                    ack.message
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default()
                );
                SubmissionOutcome::Success
            }
            Err(error) => Self::classify(error),
        };

        match &outcome {
            SubmissionOutcome::Success => self.metrics.record_lead_accepted(),
            SubmissionOutcome::Failure(_) => self.metrics.record_lead_rejected(),
            SubmissionOutcome::NetworkError => self.metrics.record_network_failure(),
        }

        outcome
    }
}
