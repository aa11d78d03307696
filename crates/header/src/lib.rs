//! Header rendering and reconciliation for masthead.
//!
//! Two pure operations over a buffer:
//!
//! - `render` - build a language-appropriate header comment from the loaded
//!   template (layout placeholders padded to the configured width, value
//!   placeholders filled from settings)
//! - `reconcile` - bring an existing header's copyright year, filename,
//!   modification timestamp and authorship line up to date, touching nothing
//!   when the buffer does not carry a recognizable header
//!
//! Both take the settings and template explicitly; neither reads the
//! filesystem or knows about any front end.

pub mod reconcile;
pub mod render;
pub mod scope;

pub use reconcile::{reconcile, Reconciliation};
pub use render::{render, timestamp_now, RenderedHeader};
pub use scope::CommentScope;
