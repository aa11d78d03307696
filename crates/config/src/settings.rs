//! Configuration structures for masthead settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application settings with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings (identity, layout, folders)
    #[serde(default)]
    pub general: GeneralSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// One slot per supported external formatter, keyed by tool name
    #[serde(default = "default_formatters")]
    pub formatters: BTreeMap<String, FormatterSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            logging: LoggingSettings::default(),
            formatters: default_formatters(),
        }
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Column width headers and separator lines are padded to
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// Author name substituted into headers
    #[serde(default)]
    pub author: String,

    /// Author email substituted into headers
    #[serde(default)]
    pub email: String,

    /// Organizations recognized in copyright lines; the first is active
    #[serde(default)]
    pub organizations: Vec<String>,

    /// Extra folders opened by the open-configs command
    #[serde(default)]
    pub folders_to_open: Vec<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            line_length: default_line_length(),
            author: String::new(),
            email: String::new(),
            organizations: Vec::new(),
            folders_to_open: Vec::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the data directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}

/// Settings for one external formatter tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatterSettings {
    /// Resolved executable path; empty means unavailable
    #[serde(default)]
    pub exec: String,

    /// Extra arguments, split on whitespace before spawning
    #[serde(default)]
    pub args: String,
}

// Default value functions for serde
fn default_line_length() -> usize {
    defaults::LINE_LENGTH
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

/// The seven supported formatter slots, initially unresolved.
fn default_formatters() -> BTreeMap<String, FormatterSettings> {
    ["uncrustify", "perltidy", "swiftformat", "gofmt", "black", "rbprettier", "rustfmt"]
        .into_iter()
        .map(|tool| (tool.to_string(), FormatterSettings::default()))
        .collect()
}
