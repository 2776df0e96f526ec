//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The provided interest is not one of the offered options.
    InvalidInterest(String),

    /// The host sent an edit for a field name this crate does not know.
    UnknownField(String),

    /// The field exists but the form variant does not render it.
    UnsupportedField(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::InvalidInterest(value) => write!(f, "Invalid interest: {}", value),
            Self::UnknownField(name) => write!(f, "Unknown form field: {}", name),
            Self::UnsupportedField(name) => {
                write!(f, "Field not available on this form: {}", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
