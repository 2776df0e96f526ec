//! The inquiry form state machine.

use crate::config::Config;
use crate::domain::ValidationError;
use crate::form::fields::{Field, FormFields};
use crate::form::state::{FormUiState, FormVariant, SubmitAttempt};
use crate::form::validation::{validate, ValidationErrorSet};
use crate::submission::{LeadSubmitter, SubmissionOutcome};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Banner shown when a submission got no usable answer.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// How long the sticky bar shows its thank-you state.
pub const STICKY_RESET_WINDOW: Duration = Duration::from_secs(4);

#[derive(Debug, Default)]
struct FormInner {
    fields: FormFields,
    errors: ValidationErrorSet,
    ui_state: FormUiState,
    /// Bumped on every submission so stale timers and guards can tell
    /// they no longer own the state.
    generation: u64,
}

fn lock(inner: &Mutex<FormInner>) -> MutexGuard<'_, FormInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One inquiry form: field values, errors, and UI state.
///
/// Cloning gives another handle to the same form. The state lock is never
/// held across the network call, so the host can keep reading state and
/// editing fields while a submission is in flight.
#[derive(Clone)]
pub struct InquiryForm {
    variant: FormVariant,
    submitter: Arc<dyn LeadSubmitter>,
    reset_window: Duration,
    inner: Arc<Mutex<FormInner>>,
}

impl InquiryForm {
    pub fn new(variant: FormVariant, submitter: Arc<dyn LeadSubmitter>) -> Self {
        Self::with_reset_window(variant, submitter, STICKY_RESET_WINDOW)
    }

    /// Create a form using the configured sticky thank-you window.
    pub fn from_config(
        variant: FormVariant,
        submitter: Arc<dyn LeadSubmitter>,
        config: &Config,
    ) -> Self {
        Self::with_reset_window(variant, submitter, config.sticky_reset_window())
    }

    /// Create a form whose sticky thank-you window is `reset_window`.
    /// Ignored for [`FormVariant::Full`].
    pub fn with_reset_window(
        variant: FormVariant,
        submitter: Arc<dyn LeadSubmitter>,
        reset_window: Duration,
    ) -> Self {
        Self {
            variant,
            submitter,
            reset_window,
            inner: Arc::new(Mutex::new(FormInner::default())),
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn fields(&self) -> FormFields {
        lock(&self.inner).fields.clone()
    }

    pub fn errors(&self) -> ValidationErrorSet {
        lock(&self.inner).errors.clone()
    }

    pub fn ui_state(&self) -> FormUiState {
        lock(&self.inner).ui_state.clone()
    }

    /// Whether the host should enable its submit button.
    pub fn is_submit_enabled(&self) -> bool {
        self.variant.accepts_submit(&lock(&self.inner).ui_state)
    }

    /// Apply an edit event from the host, keyed by the input's name.
    pub fn apply_edit(&self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        self.set_field(name.parse()?, value)
    }

    /// Store a new value for `field` and clear that field's error, if any.
    ///
    /// Other errors are left alone; nothing is revalidated until the next
    /// submit.
    ///
    /// # Errors
    ///
    /// `UnsupportedField` if this variant does not render `field`;
    /// `InvalidInterest` for an unknown interest value.
    pub fn set_field(&self, field: Field, value: impl Into<String>) -> Result<(), ValidationError> {
        if !self.variant.renders(field) {
            return Err(ValidationError::UnsupportedField(field.to_string()));
        }

        let mut inner = lock(&self.inner);
        inner.fields.set(field, value.into())?;
        inner.errors.clear(field);
        Ok(())
    }

    /// Validate and, if valid, send the lead.
    ///
    /// At most one submission is in flight per form: triggers that arrive
    /// while submitting (or while the full form's thank-you view shows)
    /// return [`SubmitAttempt::Ignored`] without touching the network. The
    /// sticky bar takes a new lead during its thank-you window.
    pub async fn submit(&self) -> SubmitAttempt {
        let (lead, generation) = {
            let mut inner = lock(&self.inner);
            if !self.variant.accepts_submit(&inner.ui_state) {
                tracing::debug!("Submit ignored in state {:?}", inner.ui_state);
                return SubmitAttempt::Ignored;
            }

            match validate(&inner.fields) {
                Ok(lead) => {
                    inner.errors.clear_all();
                    inner.ui_state = FormUiState::Submitting;
                    inner.generation += 1;
                    (lead, inner.generation)
                }
                Err(errors) => {
                    tracing::debug!("Inquiry failed validation on {} field(s)", errors.len());
                    inner.errors = errors.clone();
                    return SubmitAttempt::Invalid(errors);
                }
            }
        };

        let mut in_flight = InFlight {
            inner: &self.inner,
            generation,
            settled: false,
        };

        let outcome = self.submitter.submit(&lead).await;

        {
            let mut inner = lock(&self.inner);
            match &outcome {
                SubmissionOutcome::Success => {
                    inner.fields = FormFields::default();
                    inner.ui_state = FormUiState::Submitted;
                }
                SubmissionOutcome::Failure(message) => {
                    inner.ui_state = FormUiState::Errored(message.clone());
                }
                SubmissionOutcome::NetworkError => {
                    inner.ui_state = FormUiState::Errored(NETWORK_ERROR_MESSAGE.to_string());
                }
            }
        }
        in_flight.settled = true;

        if outcome.is_success() && self.variant.auto_resets() {
            self.schedule_reset(generation);
        }

        SubmitAttempt::Completed(outcome)
    }

    /// Leave the thank-you view and start a fresh inquiry.
    ///
    /// Returns `false` if the form was not showing the thank-you view.
    pub fn send_another(&self) -> bool {
        let mut inner = lock(&self.inner);
        if inner.ui_state == FormUiState::Submitted {
            inner.ui_state = FormUiState::Editing;
            true
        } else {
            false
        }
    }

    fn schedule_reset(&self, generation: u64) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime; sticky inquiry will not reset on its own");
                return;
            }
        };

        let weak: Weak<Mutex<FormInner>> = Arc::downgrade(&self.inner);
        let window = self.reset_window;
        handle.spawn(async move {
            tokio::time::sleep(window).await;
            if let Some(inner) = weak.upgrade() {
                let mut inner = lock(&inner);
                if inner.generation == generation && inner.ui_state == FormUiState::Submitted {
                    inner.ui_state = FormUiState::Editing;
                    tracing::debug!("Sticky inquiry returned to editing");
                }
            }
        });
    }
}

/// Puts the form back into an editable state if a submission future is
/// dropped before the outcome arrives.
struct InFlight<'a> {
    inner: &'a Mutex<FormInner>,
    generation: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = lock(self.inner);
        if inner.generation == self.generation && inner.ui_state == FormUiState::Submitting {
            tracing::warn!("Submission abandoned before the CRM answered");
            inner.ui_state = FormUiState::Errored(NETWORK_ERROR_MESSAGE.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadRecord;
    use async_trait::async_trait;

    struct AlwaysAccept;

    #[async_trait]
    impl LeadSubmitter for AlwaysAccept {
        async fn submit(&self, _lead: &LeadRecord) -> SubmissionOutcome {
            SubmissionOutcome::Success
        }
    }

    struct NeverAnswers;

    #[async_trait]
    impl LeadSubmitter for NeverAnswers {
        async fn submit(&self, _lead: &LeadRecord) -> SubmissionOutcome {
            std::future::pending::<SubmissionOutcome>().await
        }
    }

    fn filled(form: &InquiryForm) {
        form.set_field(Field::Name, "Asha").unwrap();
        form.set_field(Field::Phone, "9876543210").unwrap();
    }

    #[test]
    fn test_edit_clears_only_that_field() {
        let form = InquiryForm::new(FormVariant::Full, Arc::new(AlwaysAccept));
        let attempt = tokio_test::block_on(form.submit());
        assert!(matches!(attempt, SubmitAttempt::Invalid(_)));
        assert_eq!(form.errors().len(), 2);

        form.set_field(Field::Name, "A").unwrap();
        let errors = form.errors();
        assert!(!errors.contains(Field::Name));
        assert!(errors.contains(Field::Phone));
    }

    #[test]
    fn test_sticky_bar_rejects_unrendered_fields() {
        let form = InquiryForm::new(FormVariant::StickyBar, Arc::new(AlwaysAccept));
        assert_eq!(
            form.apply_edit("message", "hello"),
            Err(ValidationError::UnsupportedField("message".to_string()))
        );
        assert!(form.apply_edit("email", "a@b.c").is_ok());
        assert!(form.apply_edit("budget", "1cr").is_err());
    }

    #[tokio::test]
    async fn test_full_form_stays_submitted_until_send_another() {
        let form = InquiryForm::new(FormVariant::Full, Arc::new(AlwaysAccept));
        filled(&form);

        assert_eq!(
            form.submit().await,
            SubmitAttempt::Completed(SubmissionOutcome::Success)
        );
        assert_eq!(form.ui_state(), FormUiState::Submitted);
        assert_eq!(form.fields(), FormFields::default());
        assert_eq!(form.submit().await, SubmitAttempt::Ignored);

        assert!(form.send_another());
        assert_eq!(form.ui_state(), FormUiState::Editing);
        assert!(!form.send_another());
    }

    #[tokio::test]
    async fn test_dropped_submission_returns_to_editable() {
        let form = InquiryForm::new(FormVariant::Full, Arc::new(NeverAnswers));
        filled(&form);

        let pending = form.submit();
        let timed_out = tokio::time::timeout(Duration::from_millis(10), pending).await;
        assert!(timed_out.is_err());

        assert_eq!(
            form.ui_state(),
            FormUiState::Errored(NETWORK_ERROR_MESSAGE.to_string())
        );
        assert_eq!(form.fields().name, "Asha");
    }
}
