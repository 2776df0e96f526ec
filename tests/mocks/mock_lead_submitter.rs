use async_trait::async_trait;
use elaira_inquiry::models::LeadRecord;
use elaira_inquiry::submission::{LeadSubmitter, SubmissionOutcome};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Mock lead submitter for testing.
///
/// Answers with queued outcomes (`Success` once the queue is empty), records
/// every lead it receives, and can hold submissions until the test releases
/// them.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockLeadSubmitter {
    outcomes: Arc<Mutex<VecDeque<SubmissionOutcome>>>,
    received: Arc<Mutex<Vec<LeadRecord>>>,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
}

#[allow(dead_code)]
impl MockLeadSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A submitter whose calls wait for [`release`](Self::release).
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn push_outcome(&self, outcome: SubmissionOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Let `count` held submissions finish.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<LeadRecord> {
        self.received.lock().unwrap().clone()
    }

    pub fn as_submitter(&self) -> Arc<dyn LeadSubmitter> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl LeadSubmitter for MockLeadSubmitter {
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(lead.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SubmissionOutcome::Success)
    }
}
