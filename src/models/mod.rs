//! Data models for leads sent to the CRM.
//!
//! This module contains the lead record produced by a validated inquiry form
//! and the request body the CRM's lead endpoint expects.

pub mod lead;

pub use lead::{CreateLeadRequest, LeadRecord};
