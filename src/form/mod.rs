//! Inquiry forms.
//!
//! Both the full contact form and the compact sticky bar run the same
//! state machine: edit, validate, submit once, then show the result.
//! Each [`InquiryForm`] owns its state; two forms never share anything
//! except, possibly, the submitter.

pub mod fields;
pub mod inquiry_form;
pub mod state;
pub mod validation;

pub use fields::{Field, FormFields};
pub use inquiry_form::{InquiryForm, NETWORK_ERROR_MESSAGE, STICKY_RESET_WINDOW};
pub use state::{FormUiState, FormVariant, SubmitAttempt};
pub use validation::{validate, ValidationErrorSet};
