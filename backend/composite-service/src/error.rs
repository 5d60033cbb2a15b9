/// Failures while loading settings or installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unable to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("Invalid configuration value for {0}")]
    InvalidConfigValue(&'static str),
    #[error("Failed to install the log subscriber: {0}")]
    LoggerSetup(String),
}
