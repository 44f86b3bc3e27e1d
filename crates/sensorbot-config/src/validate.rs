//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Largest accepted sensor timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_telegram(config)?;
    validate_sensor(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_telegram(config: &Config) -> ConfigResult<()> {
    match config.telegram.bot_token.as_deref() {
        Some(token) if !token.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingToken),
    }
}

fn validate_sensor(config: &Config) -> ConfigResult<()> {
    let s = &config.sensor;

    let url = url::Url::parse(&s.url).map_err(|e| ConfigError::ValidationError {
        field: "sensor.url".to_owned(),
        message: format!("'{}' is not a valid URL: {e}", s.url),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            field: "sensor.url".to_owned(),
            message: format!("unsupported scheme '{}'; expected http or https", url.scheme()),
        });
    }

    if s.timeout_secs == 0 || s.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::ValidationError {
            field: "sensor.timeout_secs".to_owned(),
            message: format!("timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !matches!(
        l.level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    ) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported level '{}'; expected one of: trace, debug, info, warn, error, off",
                l.level
            ),
        });
    }

    if !matches!(l.format.as_str(), "pretty" | "compact" | "json") {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported format '{}'; expected one of: pretty, compact, json",
                l.format
            ),
        });
    }

    Ok(())
}
