//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `/etc/sensorbot/config.toml` (system)
//! 3. Merge `~/.sensorbot/config.toml` (user)
//! 4. Merge the explicit file (`--config` or `SENSORBOT_CONFIG`), if any
//! 5. Apply env var fallbacks for fields no file set
//! 6. Deserialize merged tree → `Config`
//! 7. Validate

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::{CONFIG_PATH_VAR, apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum config file size (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// A validated configuration and the files it was built from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Config files that were merged, lowest priority first.
    pub loaded_files: Vec<String>,
}

/// Load configuration from the real environment and home directory.
///
/// # Errors
///
/// See [`load_with`].
pub fn load(explicit_path: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let env_vars = collect_env_vars();
    let home = home_directory().ok();
    load_with(
        explicit_path,
        home.as_deref(),
        Some(Path::new("/etc/sensorbot/config.toml")),
        &env_vars,
    )
}

/// Load configuration with every input supplied by the caller.
///
/// `home_dir` is searched for `.sensorbot/config.toml`; `system_path` is
/// the system-wide file. Either may be `None` to skip that layer.
///
/// This usually runs before a subscriber is installed, so per-file events
/// are `debug` only. Callers report [`ResolvedConfig::loaded_files`] once
/// logging is up.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, an explicit
/// file is missing, an env var is malformed, or the merged configuration
/// fails validation.
pub fn load_with<S: ::std::hash::BuildHasher>(
    explicit_path: Option<&Path>,
    home_dir: Option<&Path>,
    system_path: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut file_fields = HashSet::new();
    let mut loaded_files = Vec::new();

    // 2. System config.
    if let Some(path) = system_path
        && let Some(overlay) = try_load_file(path)?
    {
        merge_layer(&mut merged, &overlay, &mut file_fields);
        loaded_files.push(path.display().to_string());
        debug!(path = %path.display(), "loaded system config");
    }

    // 3. User config.
    if let Some(home) = home_dir {
        let user_path = home.join(".sensorbot").join("config.toml");
        if let Some(overlay) = try_load_file(&user_path)? {
            merge_layer(&mut merged, &overlay, &mut file_fields);
            loaded_files.push(user_path.display().to_string());
            debug!(path = %user_path.display(), "loaded user config");
        }
    }

    // 4. Explicit config, which must exist.
    let explicit: Option<PathBuf> = explicit_path.map(Path::to_path_buf).or_else(|| {
        env_vars
            .get(CONFIG_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    if let Some(path) = explicit {
        let overlay = load_file(&path)?;
        merge_layer(&mut merged, &overlay, &mut file_fields);
        loaded_files.push(path.display().to_string());
        debug!(path = %path.display(), "loaded config");
    }

    // 5. Env var fallbacks.
    let applied = apply_env_fallbacks(&mut merged, &file_fields, env_vars)?;
    debug!(count = applied, "applied env var fallbacks");

    // 6. Deserialize.
    let config: Config = merged.try_into().map_err(|e| ConfigError::ParseError {
        path: "<merged config>".to_owned(),
        source: e,
    })?;

    // 7. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
    })
}

/// Load a single config file as a TOML value. The file must exist.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read and
/// [`ConfigError::ParseError`] if it is not valid TOML.
pub fn load_file(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_content(path, &content)
}

/// Like [`load_file`], but a missing file is `Ok(None)`.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };
    parse_content(path, &content).map(Some)
}

fn parse_content(path: &Path, content: &str) -> ConfigResult<toml::Value> {
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Deep-merge `overlay` into `base`, recording every leaf path it sets.
fn merge_layer(base: &mut toml::Value, overlay: &toml::Value, file_fields: &mut HashSet<String>) {
    deep_merge_tracking(base, overlay, "", file_fields);
}

fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    file_fields: &mut HashSet<String>,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() => {
                        deep_merge_tracking(base_val, overlay_val, &path, file_fields);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        file_fields.insert(path);
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_all_leaves(overlay_val, &path, file_fields);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            file_fields.insert(prefix.to_owned());
        },
    }
}

fn record_all_leaves(val: &toml::Value, prefix: &str, file_fields: &mut HashSet<String>) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_all_leaves(child, &format!("{prefix}.{key}"), file_fields);
        }
    } else {
        file_fields.insert(prefix.to_owned());
    }
}

fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}
