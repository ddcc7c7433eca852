use anyhow::anyhow;
use clap::{Args, Subcommand};
use portfolio_config::Config;
use portfolio_core_contact_contracts::{ContactFormService, ContactSubmitError};
use portfolio_models::contact::{FieldErrors, FieldName, FormFields};

use crate::{environment, notice::StderrNoticeService};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Send a message through the contact form
    #[command(aliases(["s"]))]
    Send {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Check the contact form fields without sending anything
    #[command(aliases(["v"]))]
    Validate {
        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Your name
    #[arg(long, default_value = "")]
    name: String,
    /// The email address to reply to
    #[arg(long, default_value = "")]
    email: String,
    /// The message to send
    #[arg(long, default_value = "")]
    message: String,
}

impl From<FieldArgs> for FormFields {
    fn from(FieldArgs { name, email, message }: FieldArgs) -> Self {
        Self {
            name,
            email,
            message,
        }
    }
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let service = environment::contact_form(config.relay, StderrNoticeService)?;
        match self {
            ContactCommand::Send { fields } => send(&service, fields.into()).await,
            ContactCommand::Validate { fields } => validate(&service, fields.into()),
        }
    }
}

pub async fn send(service: &impl ContactFormService, fields: FormFields) -> anyhow::Result<()> {
    fill(service, fields);

    match service.submit().await {
        Ok(()) => {
            println!("Thank you! Your message has been sent.");
            Ok(())
        }
        Err(ContactSubmitError::Invalid(errors)) => Err(invalid(&errors)),
        Err(err) => Err(err.into()),
    }
}

pub fn validate(service: &impl ContactFormService, fields: FormFields) -> anyhow::Result<()> {
    fill(service, fields);

    let validation = service.validate();
    if !validation.valid {
        return Err(invalid(&validation.errors));
    }

    println!("The message is ready to be sent.");
    Ok(())
}

fn fill(service: &impl ContactFormService, fields: FormFields) {
    let FormFields {
        name,
        email,
        message,
    } = fields;
    service.update_field(FieldName::Name, name);
    service.update_field(FieldName::Email, email);
    service.update_field(FieldName::Message, message);
}

fn invalid(errors: &FieldErrors) -> anyhow::Error {
    let details = errors
        .iter()
        .map(|(field, err)| format!("\n  {field}: {err}"))
        .collect::<String>();
    anyhow!("The form contains invalid fields:{details}")
}

#[cfg(test)]
mod tests {
    use portfolio_core_contact_contracts::MockContactFormService;
    use portfolio_models::contact::{FieldError, FormValidation};
    use pretty_assertions::assert_eq;

    use super::*;

    fn bob() -> FormFields {
        FormFields {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            message: "hi".into(),
        }
    }

    fn expect_fill(service: MockContactFormService, fields: FormFields) -> MockContactFormService {
        service
            .with_update_field(FieldName::Name, fields.name)
            .with_update_field(FieldName::Email, fields.email)
            .with_update_field(FieldName::Message, fields.message)
    }

    #[tokio::test]
    async fn send_ok() {
        let service = expect_fill(MockContactFormService::new(), bob()).with_submit(Ok(()));

        send(&service, bob()).await.unwrap();
    }

    #[tokio::test]
    async fn send_invalid() {
        let errors = FieldErrors {
            name: Some(FieldError::NameRequired),
            email: Some(FieldError::EmailInvalid),
            message: None,
        };
        let fields = FormFields {
            name: String::new(),
            email: "notanemail".into(),
            message: "hi".into(),
        };
        let service = expect_fill(MockContactFormService::new(), fields.clone())
            .with_submit(Err(ContactSubmitError::Invalid(errors)));

        let err = send(&service, fields).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "The form contains invalid fields:\n  name: Name is required\n  email: Please enter a \
             valid email"
        );
    }

    #[tokio::test]
    async fn send_relay_error() {
        let service = expect_fill(MockContactFormService::new(), bob())
            .with_submit(Err(ContactSubmitError::Send));

        let err = send(&service, bob()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to send message.");
    }

    #[test]
    fn validate_ok() {
        let mut service = expect_fill(MockContactFormService::new(), bob());
        service
            .expect_validate()
            .once()
            .return_const(FormValidation {
                valid: true,
                errors: FieldErrors::default(),
            });

        validate(&service, bob()).unwrap();
    }

    #[test]
    fn validate_invalid() {
        let mut service = expect_fill(MockContactFormService::new(), FormFields::default());
        service
            .expect_validate()
            .once()
            .return_const(FormFields::default().validate());

        let err = validate(&service, FormFields::default()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "The form contains invalid fields:\n  name: Name is required\n  email: Email is \
             required\n  message: Message is required"
        );
    }
}
