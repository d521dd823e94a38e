//! Platform-specific configuration and cache paths.

use crate::constants::{APP_NAME, CONFIG_PATH_ENV};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/clade-counts/`
/// - macOS: `~/Library/Application Support/clade-counts/`
/// - Windows: `%APPDATA%\clade-counts\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
///
/// `CLADE_COUNTS_CONFIG` takes precedence over the platform location.
pub fn config_file_path() -> Result<PathBuf> {
    config_file_path_with(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
}

fn config_file_path_with(env_override: Option<PathBuf>) -> Result<PathBuf> {
    match env_override {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Ok(config_dir()?.join("config.toml")),
    }
}

/// Get the cache directory for the current platform.
///
/// - Linux: `~/.cache/clade-counts/`
/// - macOS: `~/Library/Caches/clade-counts/`
/// - Windows: `%LOCALAPPDATA%\clade-counts\cache\`
pub fn cache_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or(Error::CacheDirNotFound)
}
