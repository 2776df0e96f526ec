//! Form UI state and the result of a submit trigger.

use crate::form::fields::Field;
use crate::form::validation::ValidationErrorSet;
use crate::submission::SubmissionOutcome;

/// What the host should render for a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormUiState {
    /// Inputs editable, no banner.
    #[default]
    Editing,

    /// A submission is in flight; submit controls are disabled.
    Submitting,

    /// The CRM accepted the lead; the thank-you view is showing.
    Submitted,

    /// Inputs editable with the last submission's error banner.
    Errored(String),
}

impl FormUiState {
    /// Editing and Errored both accept input and a new submit.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editing | Self::Errored(_))
    }

    /// Banner text for the Errored state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Which of the two inquiry forms this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    /// Full contact section form; stays on the thank-you view until the
    /// visitor asks to send another inquiry.
    Full,

    /// Compact bar fixed to the bottom of the page; returns to editing on
    /// its own after a short thank-you window.
    StickyBar,
}

impl FormVariant {
    /// Inputs this variant renders.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Full => &[
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::Interested,
                Field::Message,
            ],
            Self::StickyBar => &[Field::Name, Field::Email, Field::Phone],
        }
    }

    pub fn renders(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    pub fn auto_resets(&self) -> bool {
        matches!(self, Self::StickyBar)
    }

    /// Whether a submit trigger in `state` starts a new submission.
    ///
    /// The sticky bar keeps its inputs live behind the thank-you message, so
    /// it takes a new lead while `Submitted`. The full form does not.
    pub fn accepts_submit(&self, state: &FormUiState) -> bool {
        match state {
            FormUiState::Submitted => matches!(self, Self::StickyBar),
            other => other.is_editable(),
        }
    }
}

/// Result of one submit trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// A submission was already in flight, or the full form's thank-you
    /// view is showing.
    Ignored,

    /// Validation failed; nothing was sent.
    Invalid(ValidationErrorSet),

    /// The lead was sent and this is how it ended.
    Completed(SubmissionOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_states() {
        assert!(FormUiState::Editing.is_editable());
        assert!(FormUiState::Errored("oops".into()).is_editable());
        assert!(!FormUiState::Submitting.is_editable());
        assert!(!FormUiState::Submitted.is_editable());
        assert_eq!(FormUiState::Errored("oops".into()).error_message(), Some("oops"));
    }

    #[test]
    fn test_sticky_bar_accepts_submit_while_submitted() {
        assert!(FormVariant::StickyBar.accepts_submit(&FormUiState::Submitted));
        assert!(!FormVariant::Full.accepts_submit(&FormUiState::Submitted));
        assert!(!FormVariant::StickyBar.accepts_submit(&FormUiState::Submitting));
        assert!(FormVariant::Full.accepts_submit(&FormUiState::Errored("x".into())));
    }

    #[test]
    fn test_sticky_bar_fields() {
        assert!(FormVariant::StickyBar.renders(Field::Phone));
        assert!(!FormVariant::StickyBar.renders(Field::Message));
        assert!(!FormVariant::StickyBar.renders(Field::Interested));
        assert!(FormVariant::Full.renders(Field::Interested));
        assert!(FormVariant::StickyBar.auto_resets());
        assert!(!FormVariant::Full.auto_resets());
    }
}
