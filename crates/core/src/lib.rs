//! Buffer model, language registry and host events for masthead.
//!
//! This crate provides the foundational abstractions the rest of the
//! workspace builds on, without coupling them to any particular front end:
//!
//! - `Buffer` - an explicit text buffer with a path, selections and a
//!   detected language, standing in for an editor view
//! - `Language` - static per-language metadata (comment delimiters,
//!   interpreter line, encoding declaration)
//! - `HostEvent` / `Command` - the events and commands a front end delivers
//!   to the application dispatcher

pub mod buffer;
pub mod event;
pub mod language;

pub use buffer::{Buffer, Selection};
pub use event::{Command, HostEvent};
pub use language::{CommentStyle, Interpreter, Language};
