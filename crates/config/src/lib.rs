//! Settings store for masthead.
//!
//! This crate provides settings loading, saving, and validation with
//! support for TOML format and XDG directory conventions. The settings
//! file is created with default values on first run; later loads read it
//! back and normalize it, so hand edits with missing keys keep working.

mod settings;
mod xdg;

pub use settings::{Config, FormatterSettings, GeneralSettings, LoggingSettings};
pub use xdg::{default_log_path, get_config_dir, get_data_dir};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    /// Column width headers and separators are padded to.
    pub const LINE_LENGTH: usize = 90;
    /// Organization used when the configured list is empty.
    pub const ORGANIZATION: &str = "Gee Dbl A";
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load settings from file.
    ///
    /// On first run, creates the settings file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load settings from an explicit path (the testable entry point).
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let original_content = std::fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&original_content)?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated settings
            if original_content != normalized_content {
                config.save_to(config_path)?;
            }

            Ok(config)
        } else {
            // First run - create the settings file with default values
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save settings to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get path to the settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("settings.toml"))
    }

    /// Get path to the header template file.
    pub fn template_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("file_header.txt"))
    }

    /// Check if path is the settings file.
    pub fn is_config_file(path: &Path) -> bool {
        Self::config_file_path().map(|p| p == path).unwrap_or(false)
    }

    /// Check if path is the header template file.
    pub fn is_template_file(path: &Path) -> bool {
        Self::template_file_path().map(|p| p == path).unwrap_or(false)
    }

    /// Validate settings content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// The organization that is currently "active".
    ///
    /// Exactly one organization is active at a time: the first entry of the
    /// configured list, or the built-in fallback when the list is empty.
    pub fn active_organization(&self) -> &str {
        self.general
            .organizations
            .first()
            .map(String::as_str)
            .unwrap_or(defaults::ORGANIZATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.general.line_length, defaults::LINE_LENGTH);

        // Second load reads the persisted defaults back
        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.general.line_length, config.general.line_length);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[general]\nauthor = \"Jane Doe\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.author, "Jane Doe");
        assert_eq!(config.general.line_length, defaults::LINE_LENGTH);

        // Load normalized the file in place
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("line_length"));
    }

    #[test]
    fn test_active_organization() {
        let mut config = Config::default();
        assert_eq!(config.active_organization(), defaults::ORGANIZATION);

        config.general.organizations = vec!["Acme Corp".into(), "Initech".into()];
        assert_eq!(config.active_organization(), "Acme Corp");
    }

    #[test]
    fn test_formatter_slots_present_by_default() {
        let config = Config::default();
        for tool in ["uncrustify", "perltidy", "swiftformat", "gofmt", "black", "rbprettier", "rustfmt"] {
            assert!(config.formatters.contains_key(tool), "missing slot {tool}");
        }
    }
}
