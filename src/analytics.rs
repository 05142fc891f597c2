//! Best-effort analytics reporting.
//! Sinks never fail from the caller's point of view, a form does not care whether
//! an event actually made it anywhere.

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("{name} ({method})")]
pub struct AnalyticsEvent {
    pub name: String,
    pub method: String,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, method: impl Into<String>) -> Self {
        AnalyticsEvent {
            name: name.into(),
            method: method.into(),
        }
    }

    /// Reported after a successful email signup.
    pub fn sign_up() -> Self {
        Self::new("sign_up", "email")
    }
}

pub trait AnalyticsSink: Send + Sync {
    fn report(&self, event: &AnalyticsEvent);
}

/// Writes events to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn report(&self, event: &AnalyticsEvent) {
        info!(
            "{:<12} - event: {}, method: {}",
            "ANALYTICS", event.name, event.method
        );
    }
}
