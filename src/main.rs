use std::{process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use formwire::{
    config::load_config, FormController, FormKind, MemorySurface, Result, SubmitEvent,
    TracingAnalytics,
};
use tracing::info;

/// Submits the signup and feedback forms to the configured API.
#[derive(Parser, Debug)]
#[command(name = "formwire", version, about)]
struct Cli {
    /// Overrides `api.gateway_url` from the configuration.
    #[arg(long, global = true)]
    gateway_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign up for emails.
    Signup { email: String },
    /// Send feedback, optionally with a contact address.
    Feedback {
        feedback: String,
        #[arg(long, default_value = "")]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        formwire::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        formwire::init_dbg_tracing();
    }

    let cli = Cli::parse();
    let config = load_config()?;

    let mut api_config = config.api.clone();
    if let Some(url) = cli.gateway_url {
        api_config.gateway_url = Some(url);
    }
    let client = api_config.client()?;

    let (kind, values) = match &cli.command {
        Command::Signup { email } => (FormKind::Signup, vec![("email", email.as_str())]),
        Command::Feedback { feedback, email } => (
            FormKind::Feedback,
            vec![("feedback", feedback.as_str()), ("email", email.as_str())],
        ),
    };

    let spec = kind.spec();
    let mut surface = MemorySurface::for_form(&spec);
    for (field, value) in values {
        surface.set_value(field, value);
    }

    let mut controller = FormController::new(spec, surface, client);
    if config.analytics.enabled {
        controller = controller.with_analytics(Arc::new(TracingAnalytics));
    }

    info!("{:<12} - Submitting the {} form", "main", kind.as_ref());
    let outcome = controller.handle_submit(&mut SubmitEvent::new()).await;

    if let Some(message) = controller.surface().message() {
        println!("{message}");
    }

    match outcome {
        Some(outcome) if outcome.is_success() => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}
