//! Contact Form 7 relay.
//!
//! Submissions are posted to the form plugin's REST feedback endpoint. The
//! plugin answers with a JSON envelope whose `status` is `mail_sent`,
//! `validation_failed`, or one of several failure codes; field-level
//! problems come back keyed by the *backend* field names (`full-name`,
//! `tel-546`) and are mapped onto the form's own fields through
//! [`FIELD_MAP`].
//!
//! Outcomes never panic or abort: they end up as [`FormState`], which keeps
//! the entered values on failure so the form can be resubmitted.

use crate::config::{ContactConfig, FormEncoding};
use crate::de;
use reqwest::blocking::{Client, multipart};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Mensaje enviado correctamente.";
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Valida los campos del formulario.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "No se pudo enviar el mensaje.";
/// Stand-in message when the endpoint answers with an empty non-JSON body.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from CF7";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    /// The plugin rejected one or more fields.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: FieldErrors,
    },
    /// Anything else: HTTP failure, mail failure, spam, transport error.
    #[error("{message}")]
    Submission { status: Option<u16>, message: String },
}

impl ContactError {
    fn submission(status: Option<u16>, message: &str) -> Self {
        ContactError::Submission {
            status,
            message: non_empty_or(message, DEFAULT_FAILURE_MESSAGE),
        }
    }
}

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Tel,
    Subject,
    Message,
}

/// Backend field name → form field.
pub const FIELD_MAP: &[(&str, FormField)] = &[
    ("full-name", FormField::FullName),
    ("email", FormField::Email),
    ("tel-546", FormField::Tel),
    ("subject", FormField::Subject),
    ("message", FormField::Message),
];

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::FullName,
        FormField::Email,
        FormField::Tel,
        FormField::Subject,
        FormField::Message,
    ];

    /// Name the plugin uses for this field.
    pub fn backend_name(self) -> &'static str {
        FIELD_MAP
            .iter()
            .find(|(_, field)| *field == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    /// Name of the input in the generated form.
    pub fn input_name(self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Tel => "tel",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    pub fn from_backend_name(name: &str) -> Option<Self> {
        FIELD_MAP
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, field)| *field)
    }
}

/// Values entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub full_name: String,
    pub email: String,
    pub tel: String,
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactPayload {
    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Tel => &self.tel,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    /// Request fields in submission order: the form values under their
    /// backend names, then the plugin's routing constants.
    pub fn form_fields(&self, config: &ContactConfig) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = FormField::ALL
            .iter()
            .map(|f| (f.backend_name(), self.value(*f).to_string()))
            .collect();
        fields.extend([
            ("_wpcf7", config.form_id.clone()),
            ("_wpcf7_version", config.version.clone()),
            ("_wpcf7_locale", config.locale.clone()),
            ("_wpcf7_unit_tag", config.unit_tag.clone()),
            ("_wpcf7_container_post", config.container_post.clone()),
        ]);
        fields
    }
}

/// Per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::FullName => self.full_name.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Tel => self.tel.as_deref(),
            FormField::Subject => self.subject.as_deref(),
            FormField::Message => self.message.as_deref(),
        }
    }

    fn set(&mut self, field: FormField, message: String) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Tel => &mut self.tel,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        };
        *slot = Some(message);
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Map the plugin's invalid fields; unknown backend names are ignored.
    pub fn from_invalid(invalid: &[InvalidField]) -> Self {
        let mut errors = Self::default();
        for item in invalid {
            if let Some(field) = FormField::from_backend_name(&item.field) {
                errors.set(field, item.message.clone());
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidField {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idref: Option<String>,
}

/// Feedback envelope returned by the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cf7Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(deserialize_with = "de::string_or_number")]
    pub contact_form_id: String,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub into: Option<String>,
    pub invalid_fields: Vec<InvalidField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_data_hash: Option<String>,
}

impl Cf7Response {
    /// Parse a response body; anything that is not the JSON envelope
    /// becomes an `error` response carrying the raw body as its message.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Cf7Response {
            status: "error".to_string(),
            message: non_empty_or(body, UNEXPECTED_RESPONSE_MESSAGE),
            ..Cf7Response::default()
        })
    }
}

/// Decide the outcome of a submission from its HTTP status and body.
///
/// Returns the success message, or the error to show inline.
pub fn interpret(http_ok: bool, status: u16, body: &str) -> Result<String, ContactError> {
    let response = Cf7Response::parse(body);
    let field_errors = FieldErrors::from_invalid(&response.invalid_fields);

    if !http_ok {
        if field_errors.is_empty() {
            return Err(ContactError::submission(Some(status), &response.message));
        }
        return Err(ContactError::Validation {
            message: non_empty_or(&response.message, DEFAULT_VALIDATION_MESSAGE),
            field_errors,
        });
    }

    match response.status.as_str() {
        "mail_sent" => Ok(non_empty_or(&response.message, DEFAULT_SUCCESS_MESSAGE)),
        "validation_failed" => Err(ContactError::Validation {
            message: non_empty_or(&response.message, DEFAULT_VALIDATION_MESSAGE),
            field_errors,
        }),
        _ => Err(ContactError::submission(None, &response.message)),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Posts submissions to the configured feedback endpoint.
#[derive(Debug, Clone)]
pub struct ContactRelay {
    http: Client,
    config: ContactConfig,
}

impl ContactRelay {
    pub fn new(config: &ContactConfig) -> Result<Self, ContactError> {
        let http = Client::builder().build().map_err(transport_error)?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// One POST, no retries.
    pub fn submit(&self, payload: &ContactPayload) -> Result<String, ContactError> {
        let fields = payload.form_fields(&self.config);
        debug!(url = %self.config.feedback_url, encoding = ?self.config.encoding, "submitting contact form");

        let request = self
            .http
            .post(&self.config.feedback_url)
            .header(ACCEPT, "application/json");
        let request = match self.config.encoding {
            FormEncoding::Multipart => {
                let form = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
            FormEncoding::Urlencoded => request.form(&fields),
        };

        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        let outcome = interpret(status.is_success(), status.as_u16(), &body);
        if let Err(e) = &outcome {
            warn!(status = status.as_u16(), error = %e, "contact submission rejected");
        }
        outcome
    }
}

fn transport_error(e: reqwest::Error) -> ContactError {
    warn!(error = %e, "contact submission failed");
    ContactError::submission(e.status().map(|s| s.as_u16()), "")
}

/// Inline state of the contact form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: ContactPayload,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub submitting: bool,
}

impl FormState {
    pub fn new(values: ContactPayload) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Clear previous feedback before a submission.
    pub fn begin_submit(&mut self) {
        self.field_errors = FieldErrors::default();
        self.error = None;
        self.success = None;
        self.submitting = true;
    }

    /// Record a submission outcome. Success clears the values; failures
    /// keep them.
    pub fn apply(&mut self, outcome: Result<String, ContactError>) {
        self.submitting = false;
        match outcome {
            Ok(message) => {
                self.success = Some(message);
                self.values = ContactPayload::default();
            }
            Err(ContactError::Validation {
                message,
                field_errors,
            }) => {
                self.error = Some(message);
                self.field_errors = field_errors;
            }
            Err(ContactError::Submission { message, .. }) => {
                self.error = Some(message);
            }
        }
    }
}
