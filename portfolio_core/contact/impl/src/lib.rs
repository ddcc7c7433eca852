use std::sync::{Mutex, MutexGuard, PoisonError};

use portfolio_core_contact_contracts::{
    notice::ContactNoticeService, ContactFormService, ContactResetError, ContactSubmitError,
};
use portfolio_extern_contracts::relay::MessageRelayApiService;
use portfolio_models::contact::{
    FieldErrors, FieldName, FormFields, FormValidation, SubmissionState,
};
use tracing::{debug, error, instrument, trace};

pub use crate::form::ContactForm;

mod form;

pub const FAILURE_NOTICE: &str = "Failed to send message. Please try again later.";

#[derive(Debug)]
pub struct ContactFormServiceImpl<Relay, Notice> {
    relay: Relay,
    notice: Notice,
    form: Mutex<ContactForm>,
}

impl<Relay, Notice> ContactFormServiceImpl<Relay, Notice> {
    pub fn new(relay: Relay, notice: Notice) -> Self {
        Self {
            relay,
            notice,
            form: Default::default(),
        }
    }

    fn form(&self) -> MutexGuard<'_, ContactForm> {
        // ContactForm transitions cannot panic halfway, so a poisoned lock
        // still holds a consistent state.
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Relay, Notice> ContactFormService for ContactFormServiceImpl<Relay, Notice>
where
    Relay: MessageRelayApiService,
    Notice: ContactNoticeService,
{
    fn update_field(&self, field: FieldName, value: String) {
        self.form().update_field(field, value);
    }

    fn validate(&self) -> FormValidation {
        self.form().validate()
    }

    #[instrument(skip(self))]
    async fn submit(&self) -> Result<(), ContactSubmitError> {
        let fields = self.form().begin_submit()?;

        trace!("send message");
        let result = self.relay.send(&fields).await;

        self.form().finish_submit(result.is_ok());

        match result {
            Ok(()) => {
                debug!("message sent");
                Ok(())
            }
            Err(err) => {
                error!("Failed to send message: {err:#}");
                self.notice.notify_failure(FAILURE_NOTICE);
                Err(ContactSubmitError::Send)
            }
        }
    }

    fn reset(&self) -> Result<(), ContactResetError> {
        self.form().reset()
    }

    fn fields(&self) -> FormFields {
        self.form().fields().clone()
    }

    fn errors(&self) -> FieldErrors {
        *self.form().errors()
    }

    fn state(&self) -> SubmissionState {
        self.form().state()
    }
}
