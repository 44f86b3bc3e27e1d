//! Sensorbot - standalone binary.
//!
//! Loads configuration, sets up logging and runs the Telegram bot until
//! interrupted.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use clap::Parser;
use sensorbot_config::{Config, LoggingSection};
use sensorbot_telegram::config::TelegramConfig;
use sensorbot_telemetry::{LogConfig, LogFormat, setup_logging};
use tracing::{debug, error, info};

/// Crates whose log level follows `[logging] level`; everything else
/// logs at `warn`.
const PROJECT_CRATES: &[&str] = &[
    "sensorbot",
    "sensorbot_core",
    "sensorbot_config",
    "sensorbot_telegram",
];

/// Sensorbot - relays sensor readings to authorized Telegram users
#[derive(Parser)]
#[command(name = "sensorbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SENSORBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let resolved = match Config::load(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            // Logging is normally configured from the file we failed to
            // load; fall back to a bare stderr logger for the fatal line.
            let _ = setup_logging(&LogConfig::new("error"));
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        },
    };

    let mut logging = resolved.config.logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    setup_logging(&log_config(&logging)?)?;
    info!(files = ?resolved.loaded_files, "loaded config");

    let config = TelegramConfig::from_config(&resolved.config)?;
    debug!(?config, "starting");
    Box::pin(sensorbot_telegram::bot::run(config)).await
}

/// Translate the `[logging]` section into a [`LogConfig`].
fn log_config(section: &LoggingSection) -> anyhow::Result<LogConfig> {
    let format: LogFormat = section.format.parse()?;
    let mut config = LogConfig::new("warn").with_format(format);
    for krate in PROJECT_CRATES {
        config = config.with_directive(format!("{krate}={}", section.level));
    }
    for directive in &section.directives {
        config = config.with_directive(directive.clone());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_config_scopes_level_to_project_crates() {
        let section = LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["teloxide=info".to_owned()],
        };
        let config = log_config(&section).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.directives.contains(&"sensorbot_core=debug".to_owned()));
        assert_eq!(config.directives.last().unwrap(), "teloxide=info");
    }

    #[test]
    fn log_config_rejects_unknown_format() {
        let section = LoggingSection {
            format: "xml".to_owned(),
            ..LoggingSection::default()
        };
        assert!(log_config(&section).is_err());
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::try_parse_from(["sensorbot", "--config", "/tmp/bot.toml", "-l", "debug"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bot.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
