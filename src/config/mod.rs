//! Tries to create an `AppConfig` from config files and the environment.
//! Layering is done by `figment`, see `AppConfig::load`.
//! The environment is picked with `APP_ENVIRONMENT` (`local` or `production`).

mod data;
mod error;

use tracing::info;

// Re-export config structs
pub use data::{AnalyticsConfig, ApiConfig, AppConfig, Environment};
pub use error::{ConfigError, ConfigResult};

/// Reads `APP_ENVIRONMENT`, defaulting to `local`.
pub fn environment() -> ConfigResult<Environment> {
    std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
}

/// Loads the configuration from `./config` for the current `Environment`.
pub fn load_config() -> ConfigResult<AppConfig> {
    let config_dir = std::env::current_dir()?.join("config");
    let environment = environment()?;
    info!(
        "{:<12} - Loading the {} configuration from {}",
        "load_config",
        environment.as_ref(),
        config_dir.display()
    );
    AppConfig::load(&config_dir, environment)
}
