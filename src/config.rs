//! Configuration management for the inquiry core.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is read first if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the lead pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// CRM API base URL
    pub crm_api_url: String,

    /// CRM API key sent with every lead
    pub crm_api_key: String,

    /// Path of the lead ingestion endpoint (default: "/leads")
    pub crm_lead_path: String,

    /// Lead source tag reported to the CRM (default: "website")
    pub lead_source: String,

    /// Project name reported to the CRM (default: "Elaira Residences")
    pub lead_project: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// How long the sticky bar shows its thank-you state, in seconds (default: 4)
    pub sticky_reset_secs: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CRM_API_BASE_URL`: Base URL for the CRM API
    /// - `CRM_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `CRM_LEAD_PATH`: Lead endpoint path (default: "/leads")
    /// - `LEAD_SOURCE`: Source tag (default: "website")
    /// - `LEAD_PROJECT`: Project name (default: "Elaira Residences")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `STICKY_RESET_SECS`: Sticky bar thank-you window (default: 4)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let crm_api_url = env::var("CRM_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("CRM_API_BASE_URL".to_string()))?;

        let crm_api_key = env::var("CRM_API_KEY")
            .map_err(|_| ConfigError::MissingVar("CRM_API_KEY".to_string()))?;

        if !crm_api_url.starts_with("http://") && !crm_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CRM_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if crm_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CRM_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let defaults = Config::default();

        let crm_lead_path = env::var("CRM_LEAD_PATH").unwrap_or(defaults.crm_lead_path);
        let lead_source = env::var("LEAD_SOURCE").unwrap_or(defaults.lead_source);
        let lead_project = env::var("LEAD_PROJECT").unwrap_or(defaults.lead_project);
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        let sticky_reset_secs =
            Self::parse_env_u64("STICKY_RESET_SECS", defaults.sticky_reset_secs)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            crm_api_url,
            crm_api_key,
            crm_lead_path,
            lead_source,
            lead_project,
            request_timeout,
            sticky_reset_secs,
            log_level,
        })
    }

    /// Sticky bar thank-you window as a `Duration`.
    pub fn sticky_reset_window(&self) -> Duration {
        Duration::from_secs(self.sticky_reset_secs)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            crm_api_url: String::new(),
            crm_api_key: String::new(),
            crm_lead_path: "/leads".to_string(),
            lead_source: "website".to_string(),
            lead_project: "Elaira Residences".to_string(),
            request_timeout: 10,
            sticky_reset_secs: 4,
            log_level: "error".to_string(),
        }
    }
}
