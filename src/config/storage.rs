//! Configuration Storage
//!
//! Locates and reads the shell's TOML configuration file.

use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "sqlite-repl";

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Default configuration file path, if the platform has a config directory
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the defaults; a file that cannot be read or parsed
/// is an error.
pub fn load(path: Option<&Path>) -> Result<ShellConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) => path,
            None => return Ok(ShellConfig::default()),
        },
    };

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ShellConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        ShellError::config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse(&content).map_err(|e| {
        ShellError::config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Parse configuration text
pub fn parse(content: &str) -> std::result::Result<ShellConfig, toml::de::Error> {
    toml::from_str(content)
}
