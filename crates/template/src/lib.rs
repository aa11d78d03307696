//! Header template model and loader for masthead.
//!
//! A header template is plain text made of layout placeholders (`top_line`,
//! `inner_line`, `last_line`) and value placeholders (filename, author,
//! email, organization, year, timestamp). The user template lives next to
//! the settings file; on first run the built-in default is written there so
//! it can be edited from then on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Placeholder tokens recognized in a template.
pub mod placeholders {
    /// Replaced by the decorated comment opening line.
    pub const TOP_LINE: &str = "top_line";
    /// Replaced by the comment continuation token.
    pub const INNER_LINE: &str = "inner_line";
    /// Replaced by the decorated comment closing line.
    pub const LAST_LINE: &str = "last_line";

    /// Replaced by the buffer's basename, or [`UNTITLED`].
    pub const FILENAME: &str = "FILENAME_PLACEHOLDER";
    /// Replaced by the configured author name.
    pub const AUTHOR: &str = "AUTHOR_PLACEHOLDER";
    /// Replaced by the configured author email.
    pub const EMAIL: &str = "EMAIL_PLACEHOLDER";
    /// Replaced by the active organization.
    pub const ORGANIZATION: &str = "ORGANIZATION_PLACEHOLDER";
    /// Xcode-style organization token, also replaced by the active
    /// organization and recognized when detecting existing headers.
    pub const ORGANIZATION_XCODE: &str = "___ORGANIZATIONNAME___";
    /// Replaced by the current four-digit year.
    pub const YEAR: &str = "YEAR_PLACEHOLDER";
    /// Replaced by the render-time timestamp.
    pub const TIMESTAMP: &str = "TIMESTAMP_PLACEHOLDER";

    /// Literal marker rendered for buffers without a backing file.
    pub const UNTITLED: &str = "<Untitled-File>";
}

/// The built-in template used until the user edits their copy.
pub const DEFAULT_TEMPLATE: &str = "top_line
inner_line FILENAME_PLACEHOLDER
inner_line
inner_line
inner_line
inner_line Author   :  AUTHOR_PLACEHOLDER <EMAIL_PLACEHOLDER>
inner_line Created  :  TIMESTAMP_PLACEHOLDER
inner_line Modified :
inner_line
inner_line Copyright \u{a9} YEAR_PLACEHOLDER By ORGANIZATION_PLACEHOLDER All rights reserved.
last_line ";

/// A loaded header template.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
    text: String,
    path: Option<PathBuf>,
}

impl HeaderTemplate {
    /// Use template text directly, with no backing file.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
        }
    }

    /// The built-in default template.
    pub fn default_template() -> Self {
        Self::from_text(DEFAULT_TEMPLATE)
    }

    /// Load the user template, writing the built-in default on first run.
    ///
    /// Filesystem errors propagate; a tool that cannot read or create its
    /// own template file should fail loudly at startup.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        let text = if path.is_file() {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_TEMPLATE)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
            DEFAULT_TEMPLATE.to_string()
        };

        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
        })
    }

    /// Re-read the template from its backing file.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            self.text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to reload template {}", path.display()))?;
        }
        Ok(())
    }

    /// Raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Backing file path, if the template was loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_has_all_line_types() {
        assert!(DEFAULT_TEMPLATE.starts_with(placeholders::TOP_LINE));
        assert!(DEFAULT_TEMPLATE.contains(placeholders::INNER_LINE));
        assert!(DEFAULT_TEMPLATE.contains(placeholders::LAST_LINE));
        assert!(DEFAULT_TEMPLATE.contains(placeholders::ORGANIZATION));
    }

    #[test]
    fn test_first_run_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_header.txt");

        let template = HeaderTemplate::load_or_init(&path).unwrap();
        assert_eq!(template.text(), DEFAULT_TEMPLATE);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_existing_file_wins_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_header.txt");
        std::fs::write(&path, "top_line\ninner_line custom\nlast_line ").unwrap();

        let mut template = HeaderTemplate::load_or_init(&path).unwrap();
        assert!(template.text().contains("custom"));

        std::fs::write(&path, "top_line\ninner_line edited\nlast_line ").unwrap();
        template.reload().unwrap();
        assert!(template.text().contains("edited"));
    }
}
