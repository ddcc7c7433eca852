use std::future::Future;

use portfolio_models::contact::{
    FieldErrors, FieldName, FormFields, FormValidation, SubmissionState,
};
use thiserror::Error;

pub mod notice;

/// The contact form: field values, validation errors and the lifecycle of a
/// single submission.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Stores the new value of `field` and clears an existing error for it
    /// without validating again.
    fn update_field(&self, field: FieldName, value: String);

    /// Validates all fields and replaces the current errors with the result.
    fn validate(&self) -> FormValidation;

    /// Validates the form and, if valid, hands the message to the relay.
    ///
    /// The form is in [`SubmissionState::Submitting`] while the relay call is
    /// outstanding. On success the fields are cleared and the form is
    /// [`SubmissionState::Submitted`], on failure it is back to
    /// [`SubmissionState::Idle`] with the input preserved and a failure
    /// notice has been raised.
    fn submit(&self) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;

    /// Returns to the editable form after a successful submission.
    fn reset(&self) -> Result<(), ContactResetError>;

    fn fields(&self) -> FormFields;

    fn errors(&self) -> FieldErrors;

    fn state(&self) -> SubmissionState;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactSubmitError {
    #[error("The form contains invalid fields.")]
    Invalid(FieldErrors),
    #[error("A message is already being sent.")]
    Busy,
    #[error("The message has already been sent.")]
    AlreadySubmitted,
    #[error("Failed to send message.")]
    Send,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactResetError {
    #[error("There is no sent message to dismiss.")]
    NotSubmitted,
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_update_field(mut self, field: FieldName, value: String) -> Self {
        self.expect_update_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_submit(mut self, result: Result<(), ContactSubmitError>) -> Self {
        self.expect_submit()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
