//! Minimal logging host.
//!
//! The style layer compiles down to a line format with `${name}` fields;
//! this module supplies the pieces that render such a format per record and
//! write it out:
//!
//! - [`Level`]: the six severities.
//! - [`Format`]: a parsed line format with builtin and custom fields.
//! - [`Formatter`]: anything that renders a line header for a level.
//! - [`LevelWrite`]: a sink that is told the level of each record it writes.
//! - [`Log`]: ties a formatter and a sink together behind `trace` .. `fatal`
//!   and the [`log`] facade.

mod format;
mod level;
mod logger;
mod output;

pub use self::format::{Format, Placeholder, DEFAULT_TIME_FORMAT};
pub use self::level::{Level, ParseLevelError};
pub use self::logger::{Log, DEFAULT_FORMAT};
pub use self::output::{LevelWrite, PlainOutput};

/// Renders the header of one log record.
///
/// The returned string may contain a `%s` marker where the message goes;
/// without one the message is appended after a space.
pub trait Formatter {
    fn render(&self, level: Level, prefix: &str) -> String;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn render(&self, level: Level, prefix: &str) -> String {
        (**self).render(level, prefix)
    }
}

impl<F: Formatter + ?Sized> Formatter for std::sync::Arc<F> {
    fn render(&self, level: Level, prefix: &str) -> String {
        (**self).render(level, prefix)
    }
}
