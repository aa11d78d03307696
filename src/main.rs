//! masthead command line front end.
//!
//! Plays the host role: loads files into buffers, synthesizes the lifecycle
//! events and commands the dispatcher understands, and writes results back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use masthead_app::{box_comment, separator_line, App, Host};
use masthead_config::Config;
use masthead_core::{Buffer, Command, HostEvent, Language, Selection};
use masthead_format::resolve_formatter_paths;
use masthead_logger::LogLevel;
use masthead_watcher::{ReloadWatcher, WatchEvent, DEFAULT_DEBOUNCE_MS};

#[derive(Parser)]
#[command(name = "masthead", version, about = "Source file header maintenance and formatter dispatch")]
struct Cli {
    /// Echo log output to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Insert a file header, or bring an existing one up to date
    Header {
        /// Files to process
        files: Vec<PathBuf>,
    },
    /// Pipe files through their configured external formatter
    Format {
        /// Files to format
        files: Vec<PathBuf>,
    },
    /// Print a full-width separator comment line
    Separator {
        /// Language the comment is for
        #[arg(long)]
        lang: String,
        /// Decorator character filling the line
        #[arg(long, default_value = "*")]
        decorator: char,
        /// Indentation column the line starts at
        #[arg(long, default_value_t = 0)]
        column: usize,
    },
    /// Print a three-line box comment
    #[command(name = "box")]
    BoxComment {
        /// Language the comment is for
        #[arg(long)]
        lang: String,
        /// Decorator character filling the top and bottom lines
        #[arg(long, default_value = "*")]
        decorator: char,
        /// Indentation column the lines start at
        #[arg(long, default_value_t = 0)]
        column: usize,
    },
    /// Print selected line ranges of a file as a new buffer
    Snip {
        /// File to read
        file: PathBuf,
        /// 1-based inclusive line ranges, e.g. --lines 10:20
        #[arg(long = "lines", required = true)]
        lines: Vec<LineRange>,
    },
    /// Ensure the header template exists and open it
    Template,
    /// Open shell or editor configuration files
    Configs {
        /// The shell startup files instead of the masthead ones
        #[arg(long)]
        shell: bool,
    },
    /// Resolve formatter executable paths and persist them
    Discover,
    /// Watch files and reconcile their headers on every change
    Watch {
        /// Files to watch
        files: Vec<PathBuf>,
    },
}

/// A 1-based inclusive line range argument.
#[derive(Debug, Clone, Copy)]
struct LineRange {
    start: usize,
    end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
        let start: usize = a.parse().map_err(|_| format!("bad line number '{a}'"))?;
        let end: usize = b.parse().map_err(|_| format!("bad line number '{b}'"))?;
        if start == 0 || end < start {
            return Err(format!("invalid range '{s}'"));
        }
        Ok(Self { start, end })
    }
}

/// Host implementation printing to the terminal.
struct CliHost;

impl Host for CliHost {
    fn status_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn error_message(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn open_file(&mut self, path: &Path) {
        // The CLI "opens" a file by handing its path to the user.
        println!("{}", path.display());
    }

    fn new_buffer(&mut self, text: &str) {
        print!("{text}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_default();
    init_logger(&config, cli.verbose);

    let mut host = CliHost;
    match cli.command {
        Cmd::Header { files } => {
            let mut app = App::startup()?;
            for path in &files {
                process_file(&mut app, &mut host, path, &Command::InsertOrUpdateHeader)?;
            }
            Ok(())
        }
        Cmd::Format { files } => {
            let mut app = App::startup()?;
            for path in &files {
                process_file(&mut app, &mut host, path, &Command::RunFormatter)?;
            }
            Ok(())
        }
        Cmd::Separator { lang, decorator, column } => {
            let language = language_named(&lang)?;
            print!("{}", separator_line(language, decorator, column, config.general.line_length));
            Ok(())
        }
        Cmd::BoxComment { lang, decorator, column } => {
            let language = language_named(&lang)?;
            let (top, body, bottom) =
                box_comment(language, decorator, column, config.general.line_length);
            println!("{top}\n{body}\n{bottom}");
            Ok(())
        }
        Cmd::Snip { file, lines } => {
            let mut app = App::startup()?;
            let mut buffer = Buffer::from_file(&file)?;
            let selections = lines
                .iter()
                .map(|range| selection_for(&buffer, *range))
                .collect::<Result<Vec<_>>>()?;
            buffer.set_selections(selections);
            app.run_command(&Command::NewFromSelection, &mut buffer, &mut host)
        }
        Cmd::Template => {
            let mut app = App::startup()?;
            let mut buffer = Buffer::new("");
            app.run_command(&Command::EditHeaderTemplate, &mut buffer, &mut host)
        }
        Cmd::Configs { shell } => {
            let mut app = App::startup()?;
            let command = if shell {
                Command::OpenShellConfigs
            } else {
                Command::OpenEditorConfigs
            };
            let mut buffer = Buffer::new("");
            app.run_command(&command, &mut buffer, &mut host)
        }
        Cmd::Discover => {
            let mut config = Config::load()?;
            resolve_formatter_paths(&mut config);
            config.save()?;
            for (tool, slot) in &config.formatters {
                let exec = if slot.exec.is_empty() { "(unavailable)" } else { slot.exec.as_str() };
                println!("{tool:<12} {exec}");
            }
            Ok(())
        }
        Cmd::Watch { files } => watch(files, &mut host),
    }
}

fn init_logger(config: &Config, verbose: bool) {
    let level = config
        .logging
        .min_level
        .parse::<LogLevel>()
        .unwrap_or(LogLevel::Info);
    let file_path = config
        .logging
        .file_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| masthead_config::default_log_path().ok());
    masthead_logger::init(file_path, level, verbose);
}

fn language_named(name: &str) -> Result<&'static Language> {
    Language::by_name(name).ok_or_else(|| anyhow!("Unknown language '{name}'"))
}

fn selection_for(buffer: &Buffer, range: LineRange) -> Result<Selection> {
    let start = buffer
        .line_range(range.start - 1)
        .ok_or_else(|| anyhow!("Line {} past end of file", range.start))?
        .start;
    let end = buffer
        .line_range(range.end - 1)
        .ok_or_else(|| anyhow!("Line {} past end of file", range.end))?
        .end;
    Ok(Selection::new(start, end))
}

/// Load a file, run one command against it, and write it back if changed.
fn process_file(app: &mut App, host: &mut CliHost, path: &Path, command: &Command) -> Result<()> {
    let mut buffer = Buffer::from_file(path)?;
    let before = buffer.text().to_string();

    app.run_command(command, &mut buffer, host)?;

    if buffer.text() != before {
        std::fs::write(path, buffer.text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        masthead_logger::info(format!("Updated {}", path.display()));
    }
    app.after_save(&buffer)?;
    Ok(())
}

/// Watch source files, reconciling headers on every outside change; settings
/// and template edits are hot-reloaded.
fn watch(files: Vec<PathBuf>, host: &mut CliHost) -> Result<()> {
    let mut app = App::startup()?;

    let mut watcher = ReloadWatcher::new(DEFAULT_DEBOUNCE_MS)?;
    watcher.watch_config_dir()?;

    let mut watched = Vec::new();
    for file in &files {
        let canonical = file
            .canonicalize()
            .with_context(|| format!("Cannot watch {}", file.display()))?;
        watcher.watch(&canonical)?;
        watched.push(canonical);
    }
    masthead_logger::info(format!("Watching {} file(s)", watched.len()));

    // Remembers what we last wrote so our own saves don't loop forever.
    let mut last_written: HashMap<PathBuf, String> = HashMap::new();

    loop {
        for event in watcher.wait_events(Duration::from_secs(1))? {
            match event {
                WatchEvent::Settings => {
                    app.handle_event(HostEvent::SettingsChanged, None, host)?;
                }
                WatchEvent::Template => {
                    app.handle_event(HostEvent::TemplateChanged, None, host)?;
                }
                WatchEvent::Source(path) => {
                    if !watched.contains(&path) {
                        continue;
                    }
                    let current = std::fs::read_to_string(&path)?;
                    if last_written.get(&path) == Some(&current) {
                        continue;
                    }

                    let mut buffer = Buffer::from_file(&path)?;
                    app.handle_event(HostEvent::BufferWillSave, Some(&mut buffer), host)?;
                    if buffer.text() != current {
                        std::fs::write(&path, buffer.text())?;
                        masthead_logger::info(format!("Reconciled {}", path.display()));
                    }
                    last_written.insert(path.clone(), buffer.text().to_string());
                    app.after_save(&buffer)?;
                }
            }
        }
    }
}
