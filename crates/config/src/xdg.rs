//! Per-user directory layout.
//!
//! Everything masthead persists lives in one of two places: the settings
//! file and the header template under the platform config directory, the
//! log file under the platform data directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "masthead";

/// The masthead config directory (`~/.config/masthead` on Linux).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_DIR))
        .context("No platform config directory")
}

/// The masthead data directory (`~/.local/share/masthead` on Linux).
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|base| base.join(APP_DIR))
        .context("No platform data directory")
}

/// Where the log goes when the settings name no explicit file.
pub fn default_log_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("masthead.log"))
}
