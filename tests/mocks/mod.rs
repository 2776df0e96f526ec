pub mod mock_lead_submitter;

pub use mock_lead_submitter::MockLeadSubmitter;
