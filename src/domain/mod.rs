//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the lead domain: phone numbers
//! and the visitor's area of interest. These value objects provide validation
//! at construction time and prevent invalid data from reaching the CRM.

pub mod errors;
pub mod interest;
pub mod phone;

pub use errors::ValidationError;
pub use interest::Interest;
pub use phone::{validate_phone_number, PhoneNumber};
