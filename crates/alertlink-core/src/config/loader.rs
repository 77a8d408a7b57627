//! Config loader — reads the well-known JSON file, normalizes, validates.
//!
//! Unlike per-request handling, configuration errors are fatal: a missing or
//! malformed file stops startup before the HTTP port binds.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::schema::Config;
use crate::error::StartupError;

/// Default config file path (`~/.alertlink/config.json`).
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path`, or the well-known path when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, StartupError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Result<Config, StartupError> {
    debug!("loading config from {}", path.display());

    let content =
        std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

    let mut config: Config =
        serde_json::from_str(&content).map_err(|source| StartupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    config.normalize();
    config.validate()?;
    Ok(config)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
