//! Shared setup for the form integration tests.

use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Result;
use formwire::{
    form::SurfaceEvent, AnalyticsEvent, AnalyticsSink, ApiClient, FormController, FormSpec,
    MemorySurface,
};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
use wiremock::MockServer;

fn _init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        tracing_subscriber::fmt()
            .without_time()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_env_filter(EnvFilter::new("debug"))
            .compact()
            .init();
    });
}

/// A form wired to its own mock API.
pub struct TestForm {
    pub api_server: MockServer,
    pub controller: FormController<MemorySurface>,
    pub analytics: Arc<RecordingAnalytics>,
}

impl TestForm {
    pub fn surface(&self) -> &MemorySurface {
        self.controller.surface()
    }

    /// Every recorded UI mutation since the form was set up.
    pub fn journal(&self) -> &[SurfaceEvent] {
        self.controller.surface().journal()
    }

    /// Requests the mock API has seen so far.
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.api_server
            .received_requests()
            .await
            .unwrap_or_default()
    }
}

/// Starts a mock API and a controller for `spec` pointed at it,
/// with the given field values already typed in.
pub async fn spawn_form(spec: FormSpec, values: &[(&str, &str)]) -> Result<TestForm> {
    // _init_test_subscriber();

    let api_server = MockServer::start().await;
    let client = ApiClient::new(api_server.uri(), None)?;
    let analytics = Arc::new(RecordingAnalytics::default());

    let mut surface = MemorySurface::for_form(&spec);
    for (field, value) in values {
        surface.set_value(field, value);
    }

    let controller =
        FormController::new(spec, surface, Some(client)).with_analytics(analytics.clone());

    Ok(TestForm {
        api_server,
        controller,
        analytics,
    })
}

/// An address on loopback that nothing listens on.
/// Binding port 0 lets the OS pick a free port, dropping the listener frees it again.
pub async fn closed_local_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    Ok(format!("http://{addr}"))
}

/// Keeps every reported event.
#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn report(&self, event: &AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
