//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override. They are only applied to fields
//! that no config file set. Empty values are treated as unset.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "SENSORBOT_CONFIG";

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// All supported env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "TELEGRAM_BOT_TOKEN",
        field_path: "telegram.bot_token",
    },
    EnvMapping {
        var_name: "TELEGRAM_AUTHORIZED_USERS",
        field_path: "telegram.authorized_users",
    },
    EnvMapping {
        var_name: "SENSORBOT_SENSOR_URL",
        field_path: "sensor.url",
    },
    EnvMapping {
        var_name: "SENSORBOT_SENSOR_TIMEOUT_SECS",
        field_path: "sensor.timeout_secs",
    },
    EnvMapping {
        var_name: "SENSORBOT_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "SENSORBOT_LOG_FORMAT",
        field_path: "logging.format",
    },
];

/// Apply env var fallbacks to `merged` for every mapped field that is not in
/// `file_fields`. Returns how many fields were filled in.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUserId`] for a malformed
/// `TELEGRAM_AUTHORIZED_USERS` entry and [`ConfigError::EnvError`] for a
/// non-numeric timeout.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    file_fields: &HashSet<String>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if file_fields.contains(mapping.field_path) {
            continue;
        }

        let Some(val) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if val.trim().is_empty() {
            continue;
        }

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );

        let toml_val = coerce_to_toml_value(mapping, val)?;
        set_field(merged, mapping.field_path, toml_val);
        count = count.saturating_add(1);
    }

    Ok(count)
}

/// Convert a raw env var value to the TOML type of its field.
fn coerce_to_toml_value(mapping: &EnvMapping, val: &str) -> ConfigResult<toml::Value> {
    match mapping.field_path {
        "telegram.authorized_users" => {
            let ids = sensorbot_core::parse_user_ids(val).map_err(|e| {
                ConfigError::InvalidUserId {
                    source_name: mapping.var_name.to_owned(),
                    entry: e.entry,
                }
            })?;
            Ok(toml::Value::Array(
                ids.into_iter().map(toml::Value::Integer).collect(),
            ))
        },
        "sensor.timeout_secs" => val
            .trim()
            .parse::<i64>()
            .map(toml::Value::Integer)
            .map_err(|e| ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a whole number of seconds: {e}"),
            }),
        _ => Ok(toml::Value::String(val.to_owned())),
    }
}

/// Set a dotted `section.field` path, creating the section if needed.
fn set_field(root: &mut toml::Value, path: &str, val: toml::Value) {
    let Some((section, field)) = path.split_once('.') else {
        return;
    };
    let Some(root_table) = root.as_table_mut() else {
        return;
    };
    let section_val = root_table
        .entry(section.to_owned())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    if let Some(table) = section_val.as_table_mut() {
        table.insert(field.to_owned(), val);
    }
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
