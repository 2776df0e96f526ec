//! Lead submission.
//!
//! [`LeadSubmitter`] is the seam between the inquiry forms and the CRM:
//! one call per lead, every failure folded into a [`SubmissionOutcome`].

mod crm_lead_submitter;
mod traits;

pub use crm_lead_submitter::CrmLeadSubmitter;
pub use traits::{LeadSubmitter, SubmissionOutcome, FALLBACK_FAILURE_MESSAGE};
