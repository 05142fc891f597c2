use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{FormSpec, FormSurface, MessageStyle, SubmitGuard};
use crate::analytics::AnalyticsSink;
use crate::api_client::{self, ApiClient};
use crate::utils::error_chain_line;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The parsed JSON body of a 2xx response.
    Success(Value),
    Failure(SubmitError),
}

/// Whatever fires a submission. Has to be able to suppress its default action.
pub trait SubmitTrigger {
    fn prevent_default(&mut self);
}

/// A plain submit event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

/// Binds a `FormSpec` to a surface and, optionally, an API client and an analytics sink.
///
/// A controller is one form. Submitting borrows it mutably for the whole cycle,
/// so one form never has two requests in flight. Separate controllers are independent.
pub struct FormController<S> {
    spec: FormSpec,
    surface: S,
    client: Option<ApiClient>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    state: SubmissionState,
}

// ###################################
// ->   IMPLS
// ###################################
impl<S: FormSurface> FormController<S> {
    /// Without a `client` every submission fails locally with the form's config message.
    pub fn new(spec: FormSpec, surface: S, client: Option<ApiClient>) -> Self {
        FormController {
            spec,
            surface,
            client,
            analytics: None,
            state: SubmissionState::Idle,
        }
    }

    /// Attaches a sink for the form's analytics event. Forms without an event ignore it.
    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Entry point for UI events: suppresses the trigger's default action, then submits.
    pub async fn handle_submit<T>(&mut self, trigger: &mut T) -> Option<Outcome>
    where
        T: SubmitTrigger + ?Sized,
    {
        trigger.prevent_default();
        self.submit().await
    }

    /// Runs one submission cycle.
    /// Returns `None` if the submit control is disabled, nothing happens in that case.
    pub async fn submit(&mut self) -> Option<Outcome> {
        if !self.surface.submit_enabled() {
            debug!(
                "{:<12} - submit control disabled, ignoring trigger for '{}'",
                "submit",
                self.spec.route()
            );
            return None;
        }

        let submission_id = Uuid::new_v4();
        let span = info_span!("submission", %submission_id, route = self.spec.route());

        Some(self.run_cycle().instrument(span).await)
    }

    async fn run_cycle(&mut self) -> Outcome {
        let Self {
            spec,
            surface,
            client,
            analytics,
            state,
        } = self;

        let values = spec.read_values(&*surface);

        // Local failures are rendered without touching the submit control.
        let local_failure = match (client.as_ref(), spec.first_missing(&values)) {
            (None, _) => SubmitError::ConfigMissing,
            (Some(_), Some(field)) => SubmitError::ValidationFailed {
                field: field.name.to_string(),
            },
            (Some(client), None) => {
                *state = SubmissionState::Submitting;

                let mut guard = SubmitGuard::acquire(&mut *surface, &spec.in_progress_label);
                let request = spec.build_request(&values);

                let outcome = match client.post_json(spec.route(), &request).await {
                    Ok(payload) => Outcome::Success(payload),
                    Err(er) => Outcome::Failure(er.into()),
                };

                render(spec, &mut *guard, &outcome);
                if let (Outcome::Success(_), Some(event), Some(sink)) =
                    (&outcome, &spec.analytics, analytics.as_ref())
                {
                    sink.report(event);
                }
                drop(guard);

                *state = if outcome.is_success() {
                    SubmissionState::Succeeded
                } else {
                    SubmissionState::Failed
                };
                return outcome;
            }
        };

        let outcome = Outcome::Failure(local_failure);
        render(spec, &mut *surface, &outcome);
        *state = SubmissionState::Failed;

        outcome
    }
}

/// Writes `outcome` to the message surface. Fields are only cleared on success.
fn render<S: FormSurface + ?Sized>(spec: &FormSpec, surface: &mut S, outcome: &Outcome) {
    match outcome {
        Outcome::Success(payload) => {
            info!("{:<12} - submission succeeded: {payload}", "render");
            surface.set_message(&spec.messages.success, MessageStyle::Success);
            for field in &spec.fields {
                surface.clear_field(field.name);
            }
        }
        Outcome::Failure(er) => {
            warn!("{:<12} - submission failed: {er}", "render");
            let text = match er {
                SubmitError::ConfigMissing => spec.messages.config_missing.clone(),
                SubmitError::ValidationFailed { .. } => spec.messages.validation_failed.clone(),
                SubmitError::Http { message, .. } | SubmitError::NetworkOrParse(message) => {
                    format!("Error: {message}")
                }
            };
            surface.set_message(&text, MessageStyle::Error);
        }
    }
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl SubmitTrigger for SubmitEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

// ###################################
// ->   ERROR
// ###################################
/// Why a submission failed. Never leaves the controller except as part of an `Outcome`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("no api endpoint configured")]
    ConfigMissing,
    #[error("required field '{field}' is empty")]
    ValidationFailed { field: String },
    #[error("api responded with status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("network or parse error: {0}")]
    NetworkOrParse(String),
}

impl From<api_client::Error> for SubmitError {
    fn from(er: api_client::Error) -> Self {
        match er {
            api_client::Error::Status { status, message } => SubmitError::Http {
                status: status.as_u16(),
                message,
            },
            other => SubmitError::NetworkOrParse(error_chain_line(&other)),
        }
    }
}
