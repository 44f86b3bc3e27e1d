//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors produced while setting up the Telegram bot.
#[derive(Debug, Error)]
pub enum TelegramBotError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] sensorbot_config::ConfigError),

    /// The sensor client could not be built.
    #[error("sensor client error: {0}")]
    Sensor(#[from] sensorbot_core::SensorError),
}

/// Convenience alias.
pub type TelegramResult<T> = Result<T, TelegramBotError>;
