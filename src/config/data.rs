//! The configuration structs used to build the AppConfig, and their impls.
use std::{path::Path, time::Duration};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::api_client::{self, ApiClient};
use crate::config::{ConfigError, ConfigResult};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the remote API. Absent and empty are treated the same.
    pub gateway_url: Option<String>,
    /// No timeout is applied when unset.
    pub timeout_millis: Option<u64>,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub enabled: bool,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers `base.toml`, `{environment}.toml` and `APP_` prefixed env variables,
    /// in that order. Nested keys are separated by `__` in env variables,
    /// e.g. `APP_API__GATEWAY_URL`.
    pub fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        Ok(config)
    }
}

impl ApiConfig {
    pub fn gateway_url(&self) -> Option<&str> {
        self.gateway_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_millis.map(Duration::from_millis)
    }

    /// Builds the `ApiClient` if a gateway URL is configured.
    /// `Ok(None)` means there is nothing to talk to, which forms report locally.
    /// The URL itself is not checked, forms report an unusable one when they submit.
    pub fn client(&self) -> api_client::Result<Option<ApiClient>> {
        let Some(url) = self.gateway_url() else {
            return Ok(None);
        };

        let client = ApiClient::new(url, self.timeout())?;

        Ok(Some(client))
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
