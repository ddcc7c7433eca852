use portfolio_core_contact_contracts::{ContactResetError, ContactSubmitError};
use portfolio_models::contact::{
    FieldErrors, FieldName, FormFields, FormValidation, SubmissionState,
};

/// State of the contact form and its transitions. Performs no I/O, sending
/// the message is up to the caller between [`ContactForm::begin_submit`] and
/// [`ContactForm::finish_submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: FormFields,
    errors: FieldErrors,
    state: SubmissionState,
}

impl ContactForm {
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn update_field(&mut self, field: FieldName, value: String) {
        self.fields.set(field, value);
        self.errors.clear(field);
    }

    pub fn validate(&mut self) -> FormValidation {
        let validation = self.fields.validate();
        self.errors = validation.errors;
        validation
    }

    /// Validates the form and moves it to [`SubmissionState::Submitting`].
    /// Returns the fields to send.
    ///
    /// Only an idle form can be submitted. Rejected triggers leave the form
    /// untouched, including its errors.
    pub fn begin_submit(&mut self) -> Result<FormFields, ContactSubmitError> {
        match self.state {
            SubmissionState::Idle => {}
            SubmissionState::Submitting => return Err(ContactSubmitError::Busy),
            SubmissionState::Submitted => return Err(ContactSubmitError::AlreadySubmitted),
        }

        let validation = self.validate();
        if !validation.valid {
            return Err(ContactSubmitError::Invalid(validation.errors));
        }

        self.state = SubmissionState::Submitting;
        Ok(self.fields.clone())
    }

    /// Resolves the outstanding submission. Does nothing if none is
    /// outstanding.
    pub fn finish_submit(&mut self, delivered: bool) {
        if self.state != SubmissionState::Submitting {
            return;
        }

        if delivered {
            self.state = SubmissionState::Submitted;
            self.fields = FormFields::default();
        } else {
            self.state = SubmissionState::Idle;
        }
    }

    pub fn reset(&mut self) -> Result<(), ContactResetError> {
        if self.state != SubmissionState::Submitted {
            return Err(ContactResetError::NotSubmitted);
        }

        self.state = SubmissionState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use portfolio_models::contact::FieldError;
    use portfolio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.update_field(FieldName::Name, "Bob".into());
        form.update_field(FieldName::Email, "bob@example.com".into());
        form.update_field(FieldName::Message, "hi".into());
        form
    }

    #[test]
    fn update_field_clears_error() {
        let mut form = ContactForm::default();
        form.validate();
        assert_eq!(form.errors().name, Some(FieldError::NameRequired));

        form.update_field(FieldName::Name, "x".into());

        assert_eq!(form.fields().name, "x");
        assert_eq!(form.errors().text(FieldName::Name), "");
        assert_eq!(form.errors().email, Some(FieldError::EmailRequired));
        assert_eq!(form.errors().message, Some(FieldError::MessageRequired));
    }

    #[test]
    fn update_field_does_not_revalidate() {
        let mut form = ContactForm::default();
        form.update_field(FieldName::Email, "notanemail".into());
        assert_eq!(form.errors(), &FieldErrors::default());

        form.validate();
        assert_eq!(form.errors().email, Some(FieldError::EmailInvalid));

        form.update_field(FieldName::Email, "still not an email".into());
        assert_eq!(form.errors().email, None);
    }

    #[test]
    fn validate_replaces_errors() {
        let mut form = ContactForm::default();
        form.validate();
        form.update_field(FieldName::Email, "bob@example.com".into());
        form.update_field(FieldName::Message, "hi".into());

        let validation = form.validate();

        assert_eq!(
            validation,
            FormValidation {
                valid: false,
                errors: FieldErrors {
                    name: Some(FieldError::NameRequired),
                    email: None,
                    message: None,
                },
            }
        );
        assert_eq!(form.errors(), &validation.errors);
    }

    #[test]
    fn begin_submit_invalid() {
        let mut form = ContactForm::default();

        let result = form.begin_submit();

        assert_matches!(result, Err(ContactSubmitError::Invalid(errors)) if !errors.is_empty());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.errors().text(FieldName::Email), "Email is required");
    }

    #[test]
    fn begin_submit_valid() {
        let mut form = filled();
        let expected = form.fields().clone();

        let result = form.begin_submit();

        assert_eq!(result, Ok(expected));
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn begin_submit_rejects_reentry() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.update_field(FieldName::Name, String::new());
        let before = form.clone();

        assert_eq!(form.begin_submit(), Err(ContactSubmitError::Busy));
        assert_eq!(form, before);
    }

    #[test]
    fn finish_submit_delivered() {
        let mut form = filled();
        form.begin_submit().unwrap();

        form.finish_submit(true);

        assert_eq!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.fields(), &FormFields::default());
        assert!(form.errors().is_empty());
        assert_eq!(form.begin_submit(), Err(ContactSubmitError::AlreadySubmitted));
    }

    #[test]
    fn finish_submit_failed_keeps_input() {
        let mut form = filled();
        let fields = form.begin_submit().unwrap();

        form.finish_submit(false);

        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.fields(), &fields);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn finish_submit_without_submission() {
        let mut form = filled();
        let before = form.clone();

        form.finish_submit(true);

        assert_eq!(form, before);
    }

    #[test]
    fn reset_after_submitted() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.finish_submit(true);

        form.reset().unwrap();

        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn reset_not_submitted() {
        let mut form = filled();
        assert_eq!(form.reset(), Err(ContactResetError::NotSubmitted));
        assert_eq!(form.state(), SubmissionState::Idle);

        form.begin_submit().unwrap();
        assert_eq!(form.reset(), Err(ContactResetError::NotSubmitted));
        assert_eq!(form.state(), SubmissionState::Submitting);
    }
}
