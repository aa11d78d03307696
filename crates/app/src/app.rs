//! The application dispatcher.
//!
//! Owns the loaded settings and header template, reacts to host lifecycle
//! events, and executes user commands against a buffer. All user-visible
//! effects go through the [`Host`] trait.

use anyhow::Result;

use masthead_config::Config;
use masthead_core::{Buffer, Command, HostEvent};
use masthead_format::{format_buffer, resolve_formatter_paths, FormatOutcome};
use masthead_header::{reconcile, render};
use masthead_template::HeaderTemplate;

use crate::comments::{box_comment, separator_line};
use crate::config_files::{editor_config_files, shell_config_files};
use crate::exec_bit;
use crate::host::Host;

/// The masthead application.
pub struct App {
    config: Config,
    template: HeaderTemplate,
}

impl App {
    /// Full startup: load settings (creating them on first run), resolve
    /// formatter paths once and persist any changes, and load or initialize
    /// the header template.
    ///
    /// Startup I/O failures propagate; a tool that cannot read its own
    /// settings should fail loudly rather than run half-configured.
    pub fn startup() -> Result<Self> {
        let mut config = Config::load()?;
        if resolve_formatter_paths(&mut config) {
            config.save()?;
            masthead_logger::info("Formatter paths resolved and saved");
        }

        let template = HeaderTemplate::load_or_init(&Config::template_file_path()?)?;
        Ok(Self { config, template })
    }

    /// Build an app from already-loaded parts (used by tests and embedders).
    pub fn with_parts(config: Config, template: HeaderTemplate) -> Self {
        Self { config, template }
    }

    /// Current settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current header template.
    pub fn template(&self) -> &HeaderTemplate {
        &self.template
    }

    /// Handle one host lifecycle event.
    ///
    /// `buffer` carries the affected buffer for buffer-scoped events and is
    /// ignored for the reload events.
    pub fn handle_event(
        &mut self,
        event: HostEvent,
        buffer: Option<&mut Buffer>,
        _host: &mut dyn Host,
    ) -> Result<()> {
        match event {
            HostEvent::BufferWillSave => {
                if let Some(buffer) = buffer {
                    self.reconcile_header(buffer)?;
                }
            }
            HostEvent::SettingsChanged => {
                self.config = Config::load()?;
                masthead_logger::info("Settings reloaded");
            }
            HostEvent::TemplateChanged => {
                self.template.reload()?;
                masthead_logger::info("Header template reloaded");
            }
            // View focus changes are host UI concerns, nothing to do here.
            HostEvent::ViewActivated | HostEvent::ViewDeactivated | HostEvent::ViewClosed => {}
        }
        Ok(())
    }

    /// Post-save pass: set the execution bit on shebanged files.
    pub fn after_save(&self, buffer: &Buffer) -> Result<()> {
        if let Some(path) = buffer.path() {
            if exec_bit::update_execution_bit(path, buffer.text())? {
                masthead_logger::debug(format!("Execution bit set on {}", path.display()));
            }
        }
        Ok(())
    }

    /// Execute one user command against a buffer.
    pub fn run_command(
        &mut self,
        command: &Command,
        buffer: &mut Buffer,
        host: &mut dyn Host,
    ) -> Result<()> {
        match command {
            Command::InsertOrUpdateHeader => self.insert_or_update_header(buffer, host),
            Command::EditHeaderTemplate => {
                let path = Config::template_file_path()?;
                if path.exists() {
                    host.open_file(&path);
                } else {
                    host.status_message("No header template file to edit.");
                }
                Ok(())
            }
            Command::SeparatorLine { decorator } => {
                self.insert_separator(buffer, *decorator);
                Ok(())
            }
            Command::BoxComment { decorator } => {
                self.insert_box(buffer, *decorator);
                Ok(())
            }
            Command::NewFromSelection => {
                let combined: String = buffer
                    .selections()
                    .iter()
                    .filter(|s| !s.is_empty())
                    .map(|s| buffer.slice(*s))
                    .collect();
                if combined.is_empty() {
                    host.status_message("Nothing selected.");
                } else {
                    host.new_buffer(&combined);
                }
                Ok(())
            }
            Command::RunFormatter => self.run_formatter(buffer, host),
            Command::OpenShellConfigs => {
                for path in shell_config_files() {
                    host.open_file(&path);
                }
                Ok(())
            }
            Command::OpenEditorConfigs => {
                for path in editor_config_files(&self.config)? {
                    host.open_file(&path);
                }
                Ok(())
            }
        }
    }

    /// Run reconciliation, logging any pass warnings.
    fn reconcile_header(&self, buffer: &mut Buffer) -> Result<bool> {
        let outcome = reconcile(buffer, &self.config, &self.template)?;
        for warning in &outcome.warnings {
            masthead_logger::warn(warning.as_str());
        }
        Ok(outcome.applied)
    }

    /// Insert a fresh header, or reconcile the existing one instead of
    /// inserting a duplicate.
    fn insert_or_update_header(&mut self, buffer: &mut Buffer, host: &mut dyn Host) -> Result<()> {
        if self.reconcile_header(buffer)? {
            host.status_message("Header updated.");
            return Ok(());
        }

        let column = buffer.indent_column(self.cursor_row(buffer));
        let rendered = render(buffer, column, &self.config, &self.template, true)?;
        buffer.insert(0, &rendered.text);
        masthead_logger::debug(format!(
            "Header inserted, cursor lands on line {}",
            rendered.landing_line
        ));
        host.status_message("Header inserted.");
        Ok(())
    }

    fn insert_separator(&self, buffer: &mut Buffer, decorator: char) {
        let Some(language) = buffer.language() else {
            return;
        };
        let row = self.cursor_row(buffer);
        let line = separator_line(
            language,
            decorator,
            buffer.indent_column(row),
            self.config.general.line_length,
        );
        let at = self.insertion_point(buffer);
        buffer.insert(at, &line);
    }

    fn insert_box(&self, buffer: &mut Buffer, decorator: char) {
        let Some(language) = buffer.language() else {
            return;
        };
        let row = self.cursor_row(buffer);
        let (top, body, bottom) = box_comment(
            language,
            decorator,
            buffer.indent_column(row),
            self.config.general.line_length,
        );
        let at = self.insertion_point(buffer);
        buffer.insert(at, &format!("{top}\n{body}\n{bottom}\n"));
    }

    fn run_formatter(&self, buffer: &mut Buffer, host: &mut dyn Host) -> Result<()> {
        match format_buffer(buffer, &self.config)? {
            FormatOutcome::Formatted { replaced } => {
                masthead_logger::debug(format!("Formatter replaced {replaced} selection(s)"));
                host.status_message("Formatting complete.");
            }
            FormatOutcome::NoFormatter => {
                host.status_message("No formatter defined for this language.");
            }
            FormatOutcome::Failed { code, message } => {
                let code = code.map_or_else(|| "?".to_string(), |c| c.to_string());
                host.error_message(&format!(
                    "The formatter returned an error code of {code}: {message}"
                ));
            }
        }
        Ok(())
    }

    /// Row of the first selection; top of the buffer without one.
    fn cursor_row(&self, buffer: &Buffer) -> usize {
        buffer
            .selections()
            .first()
            .map(|s| buffer.rowcol(s.start).0)
            .unwrap_or(0)
    }

    /// Byte offset where decorations are inserted: the first selection, or
    /// the end of the buffer.
    fn insertion_point(&self, buffer: &Buffer) -> usize {
        buffer
            .selections()
            .first()
            .map(|s| s.start)
            .unwrap_or_else(|| buffer.text().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use masthead_core::Selection;

    #[derive(Default)]
    struct RecordingHost {
        statuses: Vec<String>,
        errors: Vec<String>,
        opened: Vec<PathBuf>,
        buffers: Vec<String>,
    }

    impl Host for RecordingHost {
        fn status_message(&mut self, message: &str) {
            self.statuses.push(message.to_string());
        }
        fn error_message(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
        fn open_file(&mut self, path: &Path) {
            self.opened.push(path.to_path_buf());
        }
        fn new_buffer(&mut self, text: &str) {
            self.buffers.push(text.to_string());
        }
    }

    fn test_app() -> App {
        let mut config = Config::default();
        config.general.line_length = 50;
        config.general.author = "Jane Doe".into();
        config.general.email = "jane@x.com".into();
        config.general.organizations = vec!["Acme Corp".into()];
        App::with_parts(config, HeaderTemplate::default_template())
    }

    #[test]
    fn test_insert_then_update_never_duplicates() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("int main() {}\n");
        buffer.set_path(PathBuf::from("demo.c"));

        app.run_command(&Command::InsertOrUpdateHeader, &mut buffer, &mut host)
            .unwrap();
        assert_eq!(buffer.text().matches("Copyright \u{a9}").count(), 1);
        assert_eq!(host.statuses.last().unwrap(), "Header inserted.");

        app.run_command(&Command::InsertOrUpdateHeader, &mut buffer, &mut host)
            .unwrap();
        assert_eq!(buffer.text().matches("Copyright \u{a9}").count(), 1);
        assert_eq!(host.statuses.last().unwrap(), "Header updated.");
    }

    #[test]
    fn test_save_event_updates_detected_header() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new(
            "/*\n * Copyright \u{a9} 2019 By Acme Corp All rights reserved.\n */\n",
        );
        buffer.set_path(PathBuf::from("aged.c"));

        app.handle_event(HostEvent::BufferWillSave, Some(&mut buffer), &mut host)
            .unwrap();
        assert!(buffer.text().contains("2019-"));
    }

    #[test]
    fn test_save_event_leaves_foreign_files_alone() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("int main() {}\n");
        buffer.set_path(PathBuf::from("foreign.c"));
        let before = buffer.text().to_string();

        app.handle_event(HostEvent::BufferWillSave, Some(&mut buffer), &mut host)
            .unwrap();
        assert_eq!(buffer.text(), before);
    }

    #[test]
    fn test_new_from_selection() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("alpha beta gamma");
        buffer.set_selections(vec![Selection::new(0, 5), Selection::new(11, 16)]);

        app.run_command(&Command::NewFromSelection, &mut buffer, &mut host)
            .unwrap();
        assert_eq!(host.buffers, vec!["alphagamma".to_string()]);
    }

    #[test]
    fn test_new_from_selection_requires_selection() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("alpha");

        app.run_command(&Command::NewFromSelection, &mut buffer, &mut host)
            .unwrap();
        assert!(host.buffers.is_empty());
        assert_eq!(host.statuses.last().unwrap(), "Nothing selected.");
    }

    #[test]
    fn test_formatter_without_mapping_reports_status() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("package main\n");
        buffer.set_path(PathBuf::from("main.go"));

        // Default settings leave every formatter slot unresolved.
        app.run_command(&Command::RunFormatter, &mut buffer, &mut host)
            .unwrap();
        assert_eq!(
            host.statuses.last().unwrap(),
            "No formatter defined for this language."
        );
    }

    #[test]
    fn test_separator_inserted_at_selection() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("line one\nline two\n");
        buffer.set_path(PathBuf::from("x.sh"));
        buffer.set_selections(vec![Selection::new(9, 9)]);

        app.run_command(
            &Command::SeparatorLine { decorator: '-' },
            &mut buffer,
            &mut host,
        )
        .unwrap();
        assert!(buffer.text().contains("\n#---"));
    }

    #[test]
    fn test_box_comment_inserted() {
        let mut app = test_app();
        let mut host = RecordingHost::default();
        let mut buffer = Buffer::new("");
        buffer.set_path(PathBuf::from("y.c"));

        app.run_command(&Command::BoxComment { decorator: '*' }, &mut buffer, &mut host)
            .unwrap();
        let lines: Vec<&str> = buffer.text().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " * ");
    }
}
