//! Client-side controller for the contact form.
//!
//! Holds the three input fields and the visible status, and drives exactly
//! one request to `POST /api/contact` per accepted submit. Every failure,
//! whatever its cause, surfaces as [`FormStatus::Error`]; the cause is only
//! logged.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// How long a success or error status stays visible before reverting to idle.
pub const STATUS_DISPLAY_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    /// Required-field check: every field must be non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// A required field is empty; nothing was sent.
    MissingFields,
    Sent,
    Failed,
}

#[derive(Debug, thiserror::Error)]
enum SubmitError {
    #[error("Failed to reach the contact endpoint")]
    Request(#[from] reqwest::Error),
    #[error("The contact endpoint answered {status}: {}", .error.as_deref().unwrap_or("no error message"))]
    Rejected {
        status: reqwest::StatusCode,
        error: Option<String>,
    },
}

#[derive(Serialize)]
struct SubmissionPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug)]
struct FormState {
    fields: FormFields,
    status: FormStatus,
    /// Bumped on every accepted submit so a stale revert never fires.
    generation: u64,
    revert: Option<JoinHandle<()>>,
}

impl FormState {
    fn cancel_revert(&mut self) {
        if let Some(handle) = self.revert.take() {
            handle.abort();
        }
    }
}

/// Returns the form to idle if a submission is abandoned before its
/// response is applied, so the submit control is never left disabled.
struct InFlight {
    state: Arc<Mutex<FormState>>,
    generation: u64,
    settled: bool,
}

impl InFlight {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.status == FormStatus::Submitting {
            tracing::warn!("Contact form submission abandoned before completion");
            state.status = FormStatus::Idle;
        }
    }
}

pub struct ContactForm {
    http_client: reqwest::Client,
    endpoint: Url,
    status_display: Duration,
    state: Arc<Mutex<FormState>>,
}

impl ContactForm {
    /// Build a controller posting to `<base_url>/api/contact`. A path in
    /// `base_url` is kept, with or without a trailing slash.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("api/contact")?;
        Ok(Self {
            http_client: reqwest::Client::new(),
            endpoint,
            status_display: STATUS_DISPLAY_DURATION,
            state: Arc::new(Mutex::new(FormState {
                fields: FormFields::default(),
                status: FormStatus::Idle,
                generation: 0,
                revert: None,
            })),
        })
    }

    pub fn with_status_display(mut self, status_display: Duration) -> Self {
        self.status_display = status_display;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status
    }

    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn can_submit(&self) -> bool {
        self.status() != FormStatus::Submitting
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().fields.name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().fields.email = email.into();
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.lock().fields.message = message.into();
    }

    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let (fields, generation) = {
            let mut state = self.lock();
            if state.status == FormStatus::Submitting {
                return SubmitOutcome::Ignored;
            }
            if !state.fields.is_complete() {
                return SubmitOutcome::MissingFields;
            }
            state.cancel_revert();
            state.generation += 1;
            state.status = FormStatus::Submitting;
            (state.fields.clone(), state.generation)
        };

        let in_flight = InFlight {
            state: self.state.clone(),
            generation,
            settled: false,
        };
        let result = self.post(&fields).await;
        in_flight.settle();

        let mut state = self.lock();
        let outcome = match result {
            Ok(()) => {
                state.fields = FormFields::default();
                state.status = FormStatus::Success;
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to send the contact form");
                state.status = FormStatus::Error;
                SubmitOutcome::Failed
            }
        };
        state.revert = Some(self.schedule_revert(generation));
        outcome
    }

    async fn post(&self, fields: &FormFields) -> Result<(), SubmitError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&SubmissionPayload {
                name: &fields.name,
                email: &fields.email,
                message: &fields.message,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.json::<RelayResponse>().await?;
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status,
                error: body.error,
            });
        }
        Ok(())
    }

    fn schedule_revert(&self, generation: u64) -> JoinHandle<()> {
        let state = Arc::downgrade(&self.state);
        let delay = self.status_display;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            revert_to_idle(&state, generation);
        })
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn revert_to_idle(state: &Weak<Mutex<FormState>>, generation: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.generation == generation
        && matches!(state.status, FormStatus::Success | FormStatus::Error)
    {
        state.status = FormStatus::Idle;
        state.revert = None;
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.lock().cancel_revert();
    }
}
