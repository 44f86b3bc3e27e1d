//! Configuration for the Telegram bot.
//!
//! Built from the layered [`sensorbot_config::Config`] once at startup.

use std::time::Duration;

use sensorbot_config::{Config, ConfigError};
use sensorbot_core::AuthorizedUsers;

use crate::error::TelegramResult;

/// Telegram bot configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Telegram Bot API token (from `@BotFather`).
    pub bot_token: String,
    /// Users allowed to interact with the bot. Empty means nobody.
    pub authorized_users: AuthorizedUsers,
    /// Sensor endpoint URL.
    pub sensor_url: String,
    /// Upper bound on one sensor fetch.
    pub sensor_timeout: Duration,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("authorized_users", &self.authorized_users)
            .field("sensor_url", &self.sensor_url)
            .field("sensor_timeout", &self.sensor_timeout)
            .finish()
    }
}

impl TelegramConfig {
    /// Extract the bot settings from a loaded configuration.
    pub fn from_config(config: &Config) -> TelegramResult<Self> {
        let bot_token = config
            .telegram
            .bot_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            bot_token,
            authorized_users: config.telegram.authorized_users.iter().copied().collect(),
            sensor_url: config.sensor.url.clone(),
            sensor_timeout: config.sensor.timeout(),
        })
    }
}
