//! Settings, template and source file watcher for masthead.
//!
//! Wraps a debounced notify watcher and classifies changed paths into the
//! reload events the dispatcher understands: the settings file, the header
//! template file, or a watched source file.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};

use masthead_config::Config;

/// Debounce duration for filesystem events.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// A classified filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The settings file changed.
    Settings,
    /// The header template file changed.
    Template,
    /// A watched source file changed.
    Source(PathBuf),
}

/// Classify a changed path.
pub fn classify(path: &Path) -> WatchEvent {
    if Config::is_config_file(path) {
        WatchEvent::Settings
    } else if Config::is_template_file(path) {
        WatchEvent::Template
    } else {
        WatchEvent::Source(path.to_path_buf())
    }
}

/// Debounced watcher yielding classified reload events.
pub struct ReloadWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    receiver: Receiver<Vec<PathBuf>>,
}

impl ReloadWatcher {
    /// Create a watcher with the given debounce interval.
    pub fn new(debounce_ms: u64) -> Result<Self> {
        let (tx, receiver) = mpsc::channel();

        let debouncer = new_debouncer(
            Duration::from_millis(debounce_ms),
            move |res: Result<Vec<DebouncedEvent>, _>| {
                if let Ok(events) = res {
                    let paths: Vec<PathBuf> = events.into_iter().map(|e| e.path).collect();
                    let _ = tx.send(paths);
                }
            },
        )
        .context("Failed to create filesystem watcher")?;

        Ok(Self { debouncer, receiver })
    }

    /// Watch a single file or directory (non-recursive).
    pub fn watch(&mut self, path: &Path) -> Result<()> {
        self.debouncer
            .watcher()
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch path: {}", path.display()))
    }

    /// Watch the masthead config directory, picking up settings and
    /// template edits.
    pub fn watch_config_dir(&mut self) -> Result<()> {
        self.watch(&masthead_config::get_config_dir()?)
    }

    /// Stop watching a path.
    pub fn unwatch(&mut self, path: &Path) -> Result<()> {
        self.debouncer
            .watcher()
            .unwatch(path)
            .with_context(|| format!("Failed to unwatch path: {}", path.display()))
    }

    /// Drain pending events without blocking.
    pub fn try_events(&self) -> Vec<WatchEvent> {
        let mut events = Vec::new();
        while let Ok(paths) = self.receiver.try_recv() {
            events.extend(paths.iter().map(|p| classify(p)));
        }
        events
    }

    /// Block up to `timeout` for the next batch of events.
    ///
    /// An empty vec means the timeout elapsed; an error means the watcher
    /// thread went away.
    pub fn wait_events(&self, timeout: Duration) -> Result<Vec<WatchEvent>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(paths) => Ok(paths.iter().map(|p| classify(p)).collect()),
            Err(RecvTimeoutError::Timeout) => Ok(Vec::new()),
            Err(RecvTimeoutError::Disconnected) => {
                Err(anyhow::anyhow!("Watcher channel disconnected"))
            }
        }
    }
}
