//! Host events and commands.
//!
//! A front end (the CLI, or an editor integration) owns the event loop and
//! delivers one event or command at a time to the application dispatcher.
//! Handlers run to completion before the next event is delivered, so there
//! is no locking anywhere in the workspace.

/// Lifecycle events delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A buffer is about to be written to disk.
    BufferWillSave,
    /// A view gained focus.
    ViewActivated,
    /// A view lost focus.
    ViewDeactivated,
    /// A view was closed.
    ViewClosed,
    /// The settings file changed on disk.
    SettingsChanged,
    /// The header template file changed on disk.
    TemplateChanged,
}

/// Commands a user can invoke through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a file header, or reconcile the existing one.
    InsertOrUpdateHeader,
    /// Open the header template file for editing.
    EditHeaderTemplate,
    /// Insert a full-width separator comment line.
    SeparatorLine {
        /// Character used to fill the line.
        decorator: char,
    },
    /// Insert a three-line box comment.
    BoxComment {
        /// Character used to fill the top and bottom lines.
        decorator: char,
    },
    /// Create a new buffer holding the current selections.
    NewFromSelection,
    /// Pipe the buffer or its selections through an external formatter.
    RunFormatter,
    /// Open the user's shell startup files.
    OpenShellConfigs,
    /// Open the masthead settings, template and configured folders.
    OpenEditorConfigs,
}
