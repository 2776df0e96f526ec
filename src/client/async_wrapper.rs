//! Async wrapper around synchronous CrmClient.
//!
//! This module provides an async interface to the synchronous CrmClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{CrmClient, LeadAck};
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use crate::models::LeadRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for CRM client operations.
#[async_trait]
pub trait AsyncCrmClient: Send + Sync {
    async fn create_lead(&self, lead: &LeadRecord) -> CrmApiResult<LeadAck>;
}

/// Async wrapper around synchronous CrmClient.
///
/// A panic inside the blocking task surfaces as [`CrmApiError::TaskFailed`]
/// instead of unwinding into the caller.
#[derive(Clone)]
pub struct AsyncCrmClientImpl {
    client: Arc<CrmClient>,
}

impl AsyncCrmClientImpl {
    pub fn new(client: CrmClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }
}

#[async_trait]
impl AsyncCrmClient for AsyncCrmClientImpl {
    async fn create_lead(&self, lead: &LeadRecord) -> CrmApiResult<LeadAck> {
        let client = self.client.clone();
        let lead = lead.clone();

        tokio::task::spawn_blocking(move || client.create_lead(&lead))
            .await
            .map_err(|e| CrmApiError::TaskFailed(e.to_string()))?
    }
}
