#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the sensorbot relay.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sensorbot_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! println!("Polling sensor at {}", resolved.config.sensor.url);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit file** (`--config <path>` or `SENSORBOT_CONFIG`)
//! 2. **User** (`~/.sensorbot/config.toml`)
//! 3. **System** (`/etc/sensorbot/config.toml`)
//! 4. **Environment variables** (`TELEGRAM_*`, `SENSORBOT_*`) - fallback only
//! 5. **Embedded defaults** (`defaults.toml` compiled into binary)

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// `explicit_path`, when given, must exist. Without it the
    /// `SENSORBOT_CONFIG` variable is consulted, then the user and system
    /// files (both optional).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a file cannot be read or parsed, an
    /// environment value is malformed, or validation fails.
    pub fn load(explicit_path: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit_path)
    }
}
