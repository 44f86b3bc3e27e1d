use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot credentials and access list.
    pub telegram: TelegramSection,
    /// Sensor endpoint settings.
    pub sensor: SensorSection,
    /// Log output settings.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// TelegramSection
// ---------------------------------------------------------------------------

/// Telegram bot configuration.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Telegram Bot API token (from `@BotFather`).
    /// Prefer environment variables over storing this in a file.
    #[serde(skip_serializing)]
    pub bot_token: Option<String>,
    /// Telegram user IDs allowed to interact with the bot.
    /// Empty means nobody is allowed.
    pub authorized_users: Vec<i64>,
}

impl std::fmt::Debug for TelegramSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSection")
            .field(
                "bot_token",
                &self.bot_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("authorized_users", &self.authorized_users)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SensorSection
// ---------------------------------------------------------------------------

/// Where and how to fetch sensor readings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorSection {
    /// URL answering `GET` with `{"temperature", "humidity", "pressure"}`.
    pub url: String,
    /// Upper bound on one fetch, in seconds.
    pub timeout_secs: u64,
}

impl SensorSection {
    /// The fetch timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            url: "http://localhost:9111/sensor-data".to_owned(),
            timeout_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format: `pretty`, `compact` or `json`.
    pub format: String,
    /// Extra `tracing` filter directives, e.g. `"teloxide=debug"`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
        }
    }
}
