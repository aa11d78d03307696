//! The host interface.
//!
//! Every user-visible effect goes through this trait so the dispatcher and
//! commands stay front-end independent: the CLI prints, an editor
//! integration would call into its own UI.

use std::path::Path;

/// User-visible effects a front end provides.
pub trait Host {
    /// Transient, non-blocking status line message.
    fn status_message(&mut self, message: &str);

    /// Blocking error report (a modal dialog in an editor, stderr in a CLI).
    fn error_message(&mut self, message: &str);

    /// Open an existing file for the user to edit.
    fn open_file(&mut self, path: &Path);

    /// Present a fresh unsaved buffer holding `text`.
    fn new_buffer(&mut self, text: &str);
}
