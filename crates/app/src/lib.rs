//! Application dispatcher and commands for masthead.
//!
//! This crate ties the workspace together:
//!
//! - `App` - owns the loaded settings and header template, handles host
//!   events one at a time and executes user commands
//! - `Host` - the trait a front end implements for user-visible effects
//!   (status line, error dialog, opening files, creating buffers)
//! - comment decoration builders, shell/editor config file discovery, and
//!   the execution-bit pass that runs after saves
//!
//! Handlers run to completion before the next event is delivered; nothing
//! here spawns threads or takes locks.

pub mod app;
pub mod comments;
pub mod config_files;
pub mod exec_bit;
pub mod host;

pub use app::App;
pub use comments::{box_comment, separator_line};
pub use host::Host;
