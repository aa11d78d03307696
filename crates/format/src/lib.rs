//! External formatter dispatch for masthead.
//!
//! Maps a buffer's language to a configured formatter executable, pipes the
//! buffer text (or each non-empty selection) through it, and replaces the
//! text with the formatter's output on a zero exit. Everything is
//! synchronous: one child process per selection, no timeout, no retry.

pub mod discover;
pub mod dispatch;
pub mod registry;

pub use discover::resolve_formatter_paths;
pub use dispatch::{format_buffer, FormatOutcome};
pub use registry::{command_for, is_supported, ToolSpec, TOOLS};
