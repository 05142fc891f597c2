use crate::{api_client, config};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("api client error: {0}")]
    ApiClient(#[from] api_client::Error),
}
