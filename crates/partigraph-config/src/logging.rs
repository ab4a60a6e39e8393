//! Tracing subscriber setup.
//!
//! Library crates in this workspace only emit `tracing` events. Applications
//! embedding them call [`init_logging`] once to install a subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::{LogFormat, LoggingConfig};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "PARTIGRAPH_LOG";

/// Parse a level or filter directive into an `EnvFilter`.
pub fn build_filter(directive: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(directive)
        .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))
}

/// Install a global tracing subscriber writing to stderr.
///
/// `PARTIGRAPH_LOG`, when set, takes precedence over `config.level`.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.is_empty() => build_filter(&directive)?,
        _ => build_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Text => builder.with_ansi(config.ansi).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
