//! What the visitor is asking about.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The "I'm interested in" choice on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    #[default]
    Sales,
    SiteVisit,
    Brochure,
    Other,
}

impl Interest {
    /// All options in display order.
    pub const ALL: [Interest; 4] = [
        Interest::Sales,
        Interest::SiteVisit,
        Interest::Brochure,
        Interest::Other,
    ];

    /// Wire value sent to the CRM and used by the host's `<select>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::SiteVisit => "site-visit",
            Self::Brochure => "brochure",
            Self::Other => "other",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales Inquiry",
            Self::SiteVisit => "Schedule a Site Visit",
            Self::Brochure => "Request Brochure",
            Self::Other => "Other Information",
        }
    }
}

impl FromStr for Interest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interest| interest.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidInterest(s.to_string()))
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
