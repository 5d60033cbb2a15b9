//! Installs the global `tracing` subscriber from [`Log`] settings.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{Log, LogFormat};
use crate::error::ConfigurationError;

/// Installs a registry with an [`EnvFilter`] and one console layer.
///
/// `RUST_LOG` wins over the configured level when it is set. Fails if a
/// global subscriber is already installed.
pub fn setup(config: &Log) -> Result<(), ConfigurationError> {
    let console = &config.console;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            console
                .filtering_directive
                .clone()
                .unwrap_or_else(|| console.level.into_level().as_str().to_lowercase()),
        )
    });

    let console_layer = console.enabled.then(|| match console.log_format {
        LogFormat::Default => fmt::layer().pretty().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    });

    tracing_subscriber::registry()
        .with(console_layer.map(|layer| layer.with_filter(filter)))
        .try_init()
        .map_err(|error| ConfigurationError::LoggerSetup(error.to_string()))
}
