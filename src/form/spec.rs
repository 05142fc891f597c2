//! Per-form configuration and the request bodies built from it.
use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{AsRefStr, IntoStaticStr};

use super::FormSurface;
use crate::analytics::AnalyticsEvent;

// ###################################
// ->   STRUCTS
// ###################################
/// The forms this crate knows how to submit.
/// The serialized name doubles as the API route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
pub enum FormKind {
    #[strum(serialize = "signup")]
    Signup,
    #[strum(serialize = "feedback")]
    Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessages {
    pub success: String,
    pub config_missing: String,
    pub validation_failed: String,
}

/// Everything that differs between two forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub kind: FormKind,
    pub fields: Vec<FieldSpec>,
    pub messages: FormMessages,
    pub idle_label: String,
    pub in_progress_label: String,
    /// Reported after a successful submission, if an `AnalyticsSink` is attached.
    pub analytics: Option<AnalyticsEvent>,
}

/// Trimmed field values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<&'static str, String>);

/// `{ "email": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
}

/// `{ "feedback": ..., "email": ... }`, the email may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    pub feedback: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionRequest {
    Signup(SignupRequest),
    Feedback(FeedbackRequest),
}

// ###################################
// ->   IMPLS
// ###################################
impl FormSpec {
    pub fn signup() -> Self {
        FormSpec {
            kind: FormKind::Signup,
            fields: vec![FieldSpec {
                name: "email",
                required: true,
            }],
            messages: FormMessages {
                success: "Thank you! Please check your email for a confirmation link to complete your subscription.".to_string(),
                config_missing: "API endpoint is not configured. Please wait a moment and try again.".to_string(),
                validation_failed: "Please enter a valid email address.".to_string(),
            },
            idle_label: "Start My Journey".to_string(),
            in_progress_label: "Submitting...".to_string(),
            analytics: Some(AnalyticsEvent::sign_up()),
        }
    }

    pub fn feedback() -> Self {
        FormSpec {
            kind: FormKind::Feedback,
            fields: vec![
                FieldSpec {
                    name: "feedback",
                    required: true,
                },
                FieldSpec {
                    name: "email",
                    required: false,
                },
            ],
            messages: FormMessages {
                success: "Thank you for your feedback!".to_string(),
                config_missing: "API endpoint is not configured.".to_string(),
                validation_failed: "Please enter your feedback before sending.".to_string(),
            },
            idle_label: "Send Feedback".to_string(),
            in_progress_label: "Sending...".to_string(),
            analytics: None,
        }
    }

    pub fn route(&self) -> &'static str {
        self.kind.into()
    }

    /// Reads and trims every declared field from `surface`.
    pub fn read_values<S: FormSurface + ?Sized>(&self, surface: &S) -> FieldValues {
        let values = self
            .fields
            .iter()
            .map(|field| (field.name, surface.field_value(field.name).trim().to_string()))
            .collect();

        FieldValues(values)
    }

    /// The first required field that is empty, if any.
    pub fn first_missing<'a>(&'a self, values: &FieldValues) -> Option<&'a FieldSpec> {
        self.fields
            .iter()
            .find(|field| field.required && values.value(field.name).is_empty())
    }

    pub fn build_request(&self, values: &FieldValues) -> SubmissionRequest {
        match self.kind {
            FormKind::Signup => SubmissionRequest::Signup(SignupRequest {
                email: values.value("email").to_string(),
            }),
            FormKind::Feedback => SubmissionRequest::Feedback(FeedbackRequest {
                feedback: values.value("feedback").to_string(),
                email: values.value("email").to_string(),
            }),
        }
    }
}

impl FormKind {
    pub fn spec(self) -> FormSpec {
        match self {
            FormKind::Signup => FormSpec::signup(),
            FormKind::Feedback => FormSpec::feedback(),
        }
    }
}

impl FieldValues {
    /// Missing fields read as empty.
    pub fn value(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or_default()
    }
}

impl<const N: usize> From<[(&'static str, &str); N]> for FieldValues {
    fn from(values: [(&'static str, &str); N]) -> Self {
        FieldValues(
            values
                .into_iter()
                .map(|(name, value)| (name, value.to_string()))
                .collect(),
        )
    }
}
