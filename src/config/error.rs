pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to build the 'Environment' from the provided string: {0}")]
    StringToEnvironmentFail(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config extraction error: {0}")]
    Figment(#[from] figment::Error),
}
