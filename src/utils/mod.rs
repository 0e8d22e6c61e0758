//! Shared utilities.
//!
//! Pure helper functions with no side effects:
//! - [`path`]: filesystem path normalization
//! - [`html`]: HTML entity escaping
//! - [`mime`]: MIME type detection for the dev server
//! - [`date`]: lightweight UTC date formatting

pub mod date;
pub mod html;
pub mod mime;
pub mod path;
