use crate::domain::{ContactEmail, EmailAddress, Submission};
use crate::email_client::{EmailClient, ProviderError, SendEmailError};
use crate::email_templates::EmailTemplates;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, post, web};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Raw request body. Absent and `null` fields both deserialize to `None`.
#[derive(Debug, Default, Deserialize)]
pub struct ContactFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// The site owner's address. Every relayed email goes here and nowhere else.
#[derive(Debug, Clone)]
pub struct ContactRecipient(pub EmailAddress);

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error("The email provider refused to relay the contact email")]
    RelayError(#[source] ProviderError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl ContactError {
    /// The only detail ever shown to the caller.
    fn public_message(&self) -> &'static str {
        match self {
            ContactError::ValidationError(_) => "All fields are required",
            ContactError::RelayError(_) => "Failed to send email. Please try again later.",
            ContactError::UnexpectedError(_) => "An error occurred. Please try again later.",
        }
    }
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::RelayError(_) | ContactError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}

impl From<SendEmailError> for ContactError {
    fn from(e: SendEmailError) -> Self {
        match e {
            SendEmailError::Rejected(provider_error) => ContactError::RelayError(provider_error),
            transport => ContactError::UnexpectedError(
                anyhow::Error::new(transport).context("Failed to send the contact email"),
            ),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Body extraction for the relay endpoint: any `Content-Type` is accepted and
/// a payload that cannot be deserialized is an unexpected error, not a 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            ContactError::UnexpectedError(
                anyhow::anyhow!("{err}").context("Failed to deserialize the contact form payload"),
            )
            .into()
        })
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(form, email_client, templates, recipient),
    fields(
        submitter_name = tracing::field::Empty,
        submitter_email = tracing::field::Empty
    )
)]
#[post("/api/contact")]
pub async fn submit_contact(
    form: web::Json<ContactFormData>,
    email_client: web::Data<EmailClient>,
    templates: web::Data<EmailTemplates>,
    recipient: web::Data<ContactRecipient>,
) -> Result<HttpResponse, ContactError> {
    let submission: Submission = form.0.try_into().map_err(ContactError::ValidationError)?;
    let span = tracing::Span::current();
    span.record("submitter_name", tracing::field::display(submission.name.as_ref()));
    span.record("submitter_email", tracing::field::display(submission.email.as_ref()));

    let email = ContactEmail::compose(&submission, &recipient.0, &templates)
        .context("Failed to render the contact email")?;
    let sent = email_client.send_email(&email).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Failed to relay the contact email");
        e
    })?;

    tracing::info!(email_id = ?sent.id, "Contact email relayed");
    Ok(HttpResponse::Ok().json(ContactResponse {
        message: "Email sent successfully".into(),
        id: sent.id,
    }))
}
