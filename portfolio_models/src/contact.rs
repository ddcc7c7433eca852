use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse syntactic email check: something, `@`, something, `.`, something.
///
/// This accepts plenty of addresses that are not valid according to RFC 5322
/// and rejects some valid ones (e.g. containing whitespace in a quoted local
/// part). Do not tighten it, the form's documented behavior depends on it.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Message,
}

impl FieldName {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw values of the contact form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        *self.get_mut(field) = value;
    }

    fn get_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Message => &mut self.message,
        }
    }

    /// Checks every field and returns the complete set of errors.
    ///
    /// Fields without an error are `None` in the result, never omitted.
    pub fn validate(&self) -> FormValidation {
        let errors = FieldErrors {
            name: self.name.trim().is_empty().then_some(FieldError::NameRequired),
            email: if self.email.trim().is_empty() {
                Some(FieldError::EmailRequired)
            } else if !EMAIL_REGEX.is_match(&self.email) {
                Some(FieldError::EmailInvalid)
            } else {
                None
            },
            message: self
                .message
                .trim()
                .is_empty()
                .then_some(FieldError::MessageRequired),
        };

        FormValidation {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
}

/// Per-field validation errors. `None` means the field has no error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<FieldError> {
        match field {
            FieldName::Name => self.name,
            FieldName::Email => self.email,
            FieldName::Message => self.message,
        }
    }

    pub fn clear(&mut self, field: FieldName) {
        match field {
            FieldName::Name => self.name = None,
            FieldName::Email => self.email = None,
            FieldName::Message => self.message = None,
        }
    }

    /// Returns the error text for `field`, or an empty string if there is none.
    pub fn text(&self, field: FieldName) -> String {
        self.get(field).map(|err| err.to_string()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL.into_iter().all(|field| self.get(field).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, FieldError)> + '_ {
        FieldName::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|err| (field, err)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormValidation {
    pub valid: bool,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// The form is visible and can be submitted.
    #[default]
    Idle,
    /// A message is being handed to the relay. Inputs stay editable, the
    /// submit action does not.
    Submitting,
    /// The message was delivered and the confirmation replaces the form.
    Submitted,
}

impl SubmissionState {
    pub fn can_submit(self) -> bool {
        self == Self::Idle
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Submitting => "Sending...",
            Self::Idle | Self::Submitted => "Send Message",
        }
    }
}
