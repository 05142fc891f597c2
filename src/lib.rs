pub mod analytics;
pub mod api_client;
pub mod config;
mod error;
pub mod form;
pub mod utils;

// re-export
pub use analytics::{AnalyticsEvent, AnalyticsSink, TracingAnalytics};
pub use api_client::ApiClient;
pub use error::{Error, Result};
pub use form::{
    FormController, FormKind, FormSpec, FormSurface, MemorySurface, MessageStyle, Outcome,
    SubmissionState, SubmitError, SubmitEvent, SubmitTrigger,
};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Tracing setup used by debug builds and tests.
/// Everything at `debug` and above, compact, no timestamps.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(EnvFilter::new("debug"))
        .compact()
        .init();
}

/// Tracing setup for release builds.
/// Defaults to `info`, can be overridden with `RUST_LOG`.
pub fn init_production_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}
