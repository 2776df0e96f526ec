//! Elaira Inquiry - lead capture core for the Elaira Residences site.
//!
//! This library holds the parts of the marketing site that carry real logic:
//! validating visitor contact details, sending them to the CRM, and the
//! viewport latch that starts each section's entrance animation.
//!
//! # Architecture
//!
//! - **domain**: Phone number validation and the interest options
//! - **models**: The lead record and the CRM request body
//! - **client**: HTTP client for the CRM lead endpoint
//! - **submission**: `LeadSubmitter` trait and its CRM-backed implementation
//! - **form**: Inquiry form state machine (full form and sticky bar)
//! - **visibility**: Viewport observation and the one-shot visibility latch
//! - **animation**: Count-up counters driven by the latch
//! - **config**, **error**, **metrics**, **observability**: Ambient plumbing

pub mod animation;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod submission;
pub mod visibility;

pub use animation::{count_up_value, spawn_count_up, CountUpAnimator, CountUpHandle};
pub use client::{AsyncCrmClient, AsyncCrmClientImpl, CrmClient};
pub use config::Config;
pub use domain::{validate_phone_number, Interest, PhoneNumber};
pub use error::{ConfigError, CrmApiError, VisibilityError};
pub use form::{Field, FormUiState, FormVariant, InquiryForm, SubmitAttempt, ValidationErrorSet};
pub use metrics::{Metrics, MetricsSummary};
pub use models::LeadRecord;
pub use submission::{CrmLeadSubmitter, LeadSubmitter, SubmissionOutcome};
pub use visibility::{ChannelViewport, RegionRef, VisibilityConfig, VisibilityDetector};
