//! Error types for the inquiry core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! None of these escape the form layer: `InquiryForm` turns every failure into
//! a user-facing message.

use thiserror::Error;

/// Errors that can occur when talking to the CRM lead endpoint.
#[derive(Error, Debug)]
pub enum CrmApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// CRM answered with an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// CRM answered 2xx but reported the lead as not accepted
    #[error("Lead rejected: {0}")]
    Rejected(String),

    /// Failed to encode the request body
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// The blocking task running the request failed or panicked
    #[error("Task join error: {0}")]
    TaskFailed(String),
}

impl CrmApiError {
    /// Whether the failure happened below the application layer
    /// (no usable response from the CRM).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Timeout | Self::TaskFailed(_) | Self::JsonError(_)
        )
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur when setting up viewport observation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisibilityError {
    /// Threshold outside `[0, 1]` or not a number
    #[error("Invalid visibility threshold: {0}")]
    InvalidThreshold(f64),

    /// Observation needs a tokio runtime to run on
    #[error("No async runtime available for viewport observation")]
    NoRuntime,

    /// The detector was unmounted and cannot observe again
    #[error("Visibility detector already unmounted")]
    Detached,
}

/// Convenience type alias for Results with CrmApiError
pub type CrmApiResult<T> = Result<T, CrmApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with VisibilityError
pub type VisibilityResult<T> = Result<T, VisibilityError>;
