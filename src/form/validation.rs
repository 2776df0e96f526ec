//! Field validation and the keyed error set.

use crate::domain::{validate_phone_number, PhoneNumber};
use crate::form::fields::{Field, FormFields};
use crate::models::LeadRecord;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NAME_REQUIRED: &str = "Name is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit phone number";

/// Per-field error messages. Empty means the form can be submitted.
///
/// Submitting replaces the whole set; editing a field clears only that
/// field's entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrorSet {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for `field`, replacing any previous one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drop the entry for `field`. Returns whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    /// Add every entry of `other`; its messages win on conflict.
    pub fn merge(&mut self, other: ValidationErrorSet) {
        self.errors.extend(other.errors);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Run full validation over `fields` and build the lead if it passes.
///
/// Name must be non-blank; phone must be non-blank and pass
/// [`validate_phone_number`]. Email and message are never checked.
pub fn validate(fields: &FormFields) -> Result<LeadRecord, ValidationErrorSet> {
    let mut errors = ValidationErrorSet::new();

    if fields.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    let phone = if fields.phone.trim().is_empty() {
        errors.insert(Field::Phone, PHONE_REQUIRED);
        None
    } else if !validate_phone_number(&fields.phone) {
        errors.insert(Field::Phone, PHONE_INVALID);
        None
    } else {
        PhoneNumber::new(fields.phone.as_str()).ok()
    };

    match (phone, errors.is_empty()) {
        (Some(phone), true) => LeadRecord::new(fields.name.as_str(), phone)
            .map(|lead| {
                lead.with_email(fields.email.as_str())
                    .with_message(fields.message.as_str())
                    .with_interest(fields.interested)
            })
            .ok_or(errors),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interest;

    fn fields(name: &str, phone: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            phone: phone.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_fields_build_lead() {
        let mut input = fields(" Asha ", "+91 9876543210");
        input.email = "asha@example.com".to_string();
        input.interested = Interest::SiteVisit;

        let lead = validate(&input).unwrap();
        assert_eq!(lead.name, "Asha");
        assert_eq!(lead.phone.national_digits(), "9876543210");
        assert_eq!(lead.email.as_deref(), Some("asha@example.com"));
        assert_eq!(lead.message, None);
        assert_eq!(lead.interested, Interest::SiteVisit);
    }

    #[test]
    fn test_missing_name_only() {
        let errors = validate(&fields("", "9876543210")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
    }

    #[test]
    fn test_phone_required_vs_invalid() {
        let errors = validate(&fields("Asha", "   ")).unwrap_err();
        assert_eq!(errors.get(Field::Phone), Some(PHONE_REQUIRED));

        let errors = validate(&fields("Asha", "98765")).unwrap_err();
        assert_eq!(errors.get(Field::Phone), Some(PHONE_INVALID));
    }

    #[test]
    fn test_both_fields_missing() {
        let errors = validate(&fields(" ", "")).unwrap_err();
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Phone));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_email_is_never_validated() {
        let mut input = fields("Asha", "9876543210");
        input.email = "not an email".to_string();
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_clear_and_merge() {
        let mut errors = ValidationErrorSet::new();
        errors.insert(Field::Name, NAME_REQUIRED);
        errors.insert(Field::Phone, PHONE_REQUIRED);

        assert!(errors.clear(Field::Name));
        assert!(!errors.clear(Field::Name));
        assert_eq!(errors.len(), 1);

        let mut newer = ValidationErrorSet::new();
        newer.insert(Field::Phone, PHONE_INVALID);
        errors.merge(newer);
        assert_eq!(errors.get(Field::Phone), Some(PHONE_INVALID));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = ValidationErrorSet::new();
        errors.insert(Field::Name, NAME_REQUIRED);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Name is required" }));
    }
}
