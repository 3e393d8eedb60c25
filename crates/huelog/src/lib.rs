//! # Huelog - Level-Aware Styled Log Formats
//!
//! Huelog compiles log line formats written with terminal style directives
//! into formatters whose colors depend on the level of each record.
//!
//! ```rust
//! use huelog::host::Level;
//! use huelog_style::render;
//!
//! let formatter = huelog::format(r#"{fg 1}{onerror "{bg 199}"}${level}{restore} %s"#).unwrap();
//!
//! assert_eq!(
//!     formatter.render(Level::Error, ""),
//!     render("{fg 1}{bg 199}ERROR{fg 1}{nobg}{nobold}{noreverse} %s").unwrap(),
//! );
//! ```
//!
//! ## Formats
//!
//! A format mixes three things:
//!
//! - host fields, `${level}`, `${time}`, `${prefix}`, rendered per record
//!   (see [`host::Format`]),
//! - style directives, `{fg 208}`, `{bold}`, `{reset}`, compiled once
//!   into escape sequences (see [`huelog_style`]),
//! - the `%s` marker where the message goes.
//!
//! ## Level-Conditional Styles
//!
//! | directive | effect |
//! |---|---|
//! | `{onlevel "error" "<fragment>"}` | emit `fragment` only for `error` records |
//! | `{ontrace ..}` .. `{onfatal ..}` | the same with the level fixed |
//! | `{store}` | remember the style set by the last matching `onlevel` |
//! | `{restore}` | return to the remembered style |
//!
//! A fragment is compiled on its own and sees the style active where it
//! appears, but does not change it. `{restore}` re-establishes that style
//! followed by the stored sequence, if a `{store}` ran in this render.
//!
//! ## Themes
//!
//! [`apply_default_theme`] wraps a plain format with per-level colors from a
//! [`ThemePalette`]; see [`theme`].
//!
//! ## Configuration
//!
//! The free functions compile with styling on. Use [`Compiler::from_env`]
//! to follow the terminal and `NO_COLOR`, or [`Compiler::styling`] to
//! choose explicitly.

mod compiler;
mod error;
mod formatter;
mod inserter;
mod preprocess;
mod restorer;

pub mod host;
pub mod theme;

pub use compiler::Compiler;
pub use error::Error;
pub use formatter::StyledFormatter;
pub use preprocess::preprocess;
pub use restorer::{Locked, OnLevelToken, Restorer, Slots, StyleMemory, Unlocked};
pub use theme::{Theme, ThemePalette};

/// Compiles a format with styling on.
///
/// Shorthand for [`Compiler::new`] followed by [`Compiler::format`].
pub fn format(formatting: &str) -> Result<StyledFormatter, Error> {
    Compiler::new().format(formatting)
}

/// Like [`format`], with a `{reset}` appended.
pub fn format_with_reset(formatting: &str) -> Result<StyledFormatter, Error> {
    Compiler::new().format_with_reset(formatting)
}

/// Builds a theme writing to stderr, with styling on.
pub fn apply_default_theme(formatting: &str, palette: &ThemePalette) -> Result<Theme, Error> {
    Compiler::new().apply_default_theme(formatting, palette)
}

/// Like [`apply_default_theme`].
///
/// # Panics
///
/// Panics if the theme cannot be built.
pub fn must_apply_default_theme(formatting: &str, palette: &ThemePalette) -> Theme {
    match apply_default_theme(formatting, palette) {
        Ok(theme) => theme,
        Err(err) => panic!("cannot apply theme to {:?}: {}", formatting, err),
    }
}
