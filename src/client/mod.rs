//! HTTP client for the CRM lead ingestion endpoint.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, error mapping,
//! and interpretation of the CRM's accept/reject responses.

mod async_wrapper;
pub use async_wrapper::{AsyncCrmClient, AsyncCrmClientImpl};

use crate::config::Config;
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use crate::models::{CreateLeadRequest, LeadRecord};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Body returned by the lead endpoint. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LeadResponse {
    /// Whether the CRM accepted the lead; absent means accepted
    #[serde(default)]
    pub success: Option<bool>,

    /// Human-readable status or rejection reason
    #[serde(default)]
    pub message: Option<String>,

    /// Some error responses use `error` instead of `message`
    #[serde(default)]
    pub error: Option<String>,
}

impl LeadResponse {
    /// The first non-blank of `message` and `error`.
    pub fn reason(&self) -> Option<String> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// What the CRM said when it accepted a lead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadAck {
    pub message: Option<String>,
}

/// Extract a human-readable reason from a response body, if it has one.
///
/// Only JSON bodies are considered; raw text and HTML error pages are not
/// shown to visitors.
pub fn rejection_reason(body: &str) -> Option<String> {
    serde_json::from_str::<LeadResponse>(body)
        .ok()
        .and_then(|response| response.reason())
}

/// HTTP client for the CRM.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct CrmClient {
    /// Base URL for the CRM API
    base_url: String,

    /// Path of the lead endpoint
    lead_path: String,

    /// API key for authentication
    api_key: String,

    /// Source tag sent with every lead
    source: String,

    /// Project name sent with every lead
    project: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CrmClient {
    /// Create a new CrmClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.crm_api_url.clone(),
            lead_path: config.crm_lead_path.clone(),
            api_key: config.crm_api_key.clone(),
            source: config.lead_source.clone(),
            project: config.lead_project.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a CrmClient with a custom base URL and default settings (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let config = Config {
            crm_api_url: base_url,
            crm_api_key: api_key,
            ..Config::default()
        };
        Self::new(&config)
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> Result<ureq::Response, CrmApiError> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("x-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {}", url, e);
                self.metrics.record_http_error();
            }
        }
        self.metrics.record_http_request(duration);

        result
    }

    /// Map a ureq error to a CrmApiError.
    fn map_error(&self, error: ureq::Error) -> CrmApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                CrmApiError::ApiError {
                    status: code,
                    message: rejection_reason(&body).unwrap_or_default(),
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    CrmApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    CrmApiError::Timeout
                } else {
                    CrmApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Send one lead to the CRM.
    ///
    /// Exactly one HTTP request is made. A 2xx answer whose body says
    /// `"success": false` becomes [`CrmApiError::Rejected`]; a 2xx answer
    /// without a readable body counts as accepted.
    pub fn create_lead(&self, lead: &LeadRecord) -> CrmApiResult<LeadAck> {
        let request = CreateLeadRequest::from_lead(lead, &self.source, &self.project, Utc::now());
        let body = serde_json::to_value(&request).map_err(CrmApiError::JsonError)?;

        let response = self.post(&self.lead_path, &body)?;
        let response_body = response
            .into_string()
            .map_err(|e| CrmApiError::HttpError(e.to_string()))?;

        if response_body.trim().is_empty() {
            return Ok(LeadAck::default());
        }

        let parsed = match serde_json::from_str::<LeadResponse>(&response_body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Lead accepted with unreadable response body: {}", e);
                return Ok(LeadAck::default());
            }
        };

        if parsed.success == Some(false) {
            return Err(CrmApiError::Rejected(parsed.reason().unwrap_or_default()));
        }

        Ok(LeadAck {
            message: parsed.reason(),
        })
    }
}
