//! PhoneNumber value object and the 10-digit local number check.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any letter, in any script. Punctuation and symbols are only formatting.
static LETTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}").expect("Failed to compile phone letter regex"));

/// Number of digits in a local (national) phone number.
pub const LOCAL_DIGITS: usize = 10;

/// Country calling codes accepted in front of a 10-digit local number.
pub const KNOWN_COUNTRY_CODES: &[&str] = &["91", "1", "44", "61", "65", "971"];

/// Check whether `raw` is a well-formed 10-digit local phone number.
///
/// Every non-digit character (spaces, punctuation, `+` anywhere) is stripped
/// before counting. Longer numbers are accepted when the extra leading digits
/// are a known country code, a `0` trunk prefix, or `00` followed by a country
/// code. Any letter rejects the input.
///
/// ```
/// use elaira_inquiry::domain::validate_phone_number;
///
/// assert!(validate_phone_number("9876543210"));
/// assert!(validate_phone_number("+91 98765 43210"));
/// assert!(!validate_phone_number("98765"));
/// assert!(validate_phone_number("(+91) 98765/43210"));
/// assert!(!validate_phone_number("98765abcde"));
/// ```
pub fn validate_phone_number(raw: &str) -> bool {
    national_digits(raw).is_some()
}

/// Normalize `raw` to its 10 national digits, or `None` if it is not valid.
fn national_digits(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || LETTER_REGEX.is_match(trimmed) {
        return None;
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        LOCAL_DIGITS => Some(digits),
        len if len > LOCAL_DIGITS => {
            let (prefix, local) = digits.split_at(len - LOCAL_DIGITS);
            is_dialing_prefix(prefix).then(|| local.to_string())
        }
        _ => None,
    }
}

fn is_dialing_prefix(prefix: &str) -> bool {
    if prefix == "0" {
        return true;
    }
    let code = prefix.strip_prefix("00").unwrap_or(prefix);
    KNOWN_COUNTRY_CODES.contains(&code)
}

/// A phone number that passed [`validate_phone_number`].
///
/// Keeps what the visitor typed for display and the normalized national
/// digits for the CRM. Serializes as the national digits.
///
/// # Example
///
/// ```
/// use elaira_inquiry::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+91 (987) 654-3210").unwrap();
/// assert_eq!(phone.national_digits(), "9876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    raw: String,
    national: String,
}

impl PhoneNumber {
    /// Create a new PhoneNumber, validating and normalizing the input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = phone.into();
        match national_digits(&raw) {
            Some(national) => Ok(Self {
                raw: raw.trim().to_string(),
                national,
            }),
            None => Err(ValidationError::InvalidPhone(raw)),
        }
    }

    /// The number as the visitor entered it (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The 10 national digits.
    pub fn national_digits(&self) -> &str {
        &self.national
    }

    /// Last four digits behind a mask, safe for logs.
    pub fn masked(&self) -> String {
        format!("******{}", &self.national[LOCAL_DIGITS - 4..])
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.national.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
