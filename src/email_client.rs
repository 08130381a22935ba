use crate::domain::{ContactEmail, EmailAddress};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Fixed identity every relayed email is sent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    name: String,
    email: EmailAddress,
}

impl Sender {
    pub fn new(name: String, email: EmailAddress) -> Self {
        Self { name, email }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: Sender,
    authorization_token: SecretString,
}

/// Provider acknowledgement of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    #[serde(default)]
    pub id: Option<String>,
}

/// Error object returned by the provider alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("{name} ({status_code:?}): {message}")]
pub struct ProviderError {
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    fn from_status(status: StatusCode) -> Self {
        Self {
            status_code: Some(status.as_u16()),
            name: "application_error".into(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown provider failure")
                .into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SendEmailError {
    /// The provider answered and refused the email.
    #[error("The email provider rejected the email")]
    Rejected(#[source] ProviderError),
    /// No usable answer was received from the provider.
    #[error("Failed to complete the request to the email provider")]
    Transport(#[from] reqwest::Error),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: Sender,
        authorization_token: SecretString,
        timeout_duration: Option<std::time::Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_duration) = timeout_duration {
            builder = builder.timeout(timeout_duration);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Send an email through the provider",
        skip(self, email),
        fields(recipient = %email.recipient)
    )]
    pub async fn send_email(&self, email: &ContactEmail) -> Result<SentEmail, SendEmailError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));
        let request_body = SendEmailRequest {
            from: self.sender.to_string().into(),
            to: vec![email.recipient.as_ref().into()],
            reply_to: email.reply_to.as_ref().into(),
            subject: email.subject.as_str().into(),
            html: email.html.as_str().into(),
            text: email.text.as_str().into(),
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.authorization_token.expose_secret()),
            )
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ProviderError>()
                .await
                .unwrap_or_else(|_| ProviderError::from_status(status));
            return Err(SendEmailError::Rejected(error));
        }
        Ok(response.json::<SentEmail>().await?)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendEmailRequest<'a> {
    #[serde(borrow)]
    pub from: Cow<'a, str>,
    #[serde(borrow)]
    pub to: Vec<Cow<'a, str>>,
    #[serde(borrow)]
    pub reply_to: Cow<'a, str>,
    #[serde(borrow)]
    pub subject: Cow<'a, str>,
    #[serde(borrow)]
    pub html: Cow<'a, str>,
    #[serde(borrow)]
    pub text: Cow<'a, str>,
}
