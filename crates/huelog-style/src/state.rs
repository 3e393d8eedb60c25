//! Running style state and the SGR escape codes that realize it.

use std::fmt;

/// Raw SGR escape sequences for each style change.
pub mod escape {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const NO_BOLD: &str = "\x1b[22m";
    pub const REVERSE: &str = "\x1b[7m";
    pub const NO_REVERSE: &str = "\x1b[27m";
    pub const DEFAULT_FOREGROUND: &str = "\x1b[39m";
    pub const DEFAULT_BACKGROUND: &str = "\x1b[49m";

    /// Sets the foreground to a 256-color palette index, or back to the
    /// terminal default for `None`.
    pub fn foreground(color: Option<u8>) -> String {
        match color {
            Some(index) => format!("\x1b[38;5;{}m", index),
            None => DEFAULT_FOREGROUND.to_string(),
        }
    }

    /// Sets the background to a 256-color palette index, or back to the
    /// terminal default for `None`.
    pub fn background(color: Option<u8>) -> String {
        match color {
            Some(index) => format!("\x1b[48;5;{}m", index),
            None => DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// The style accumulated while a [`Style`](crate::Style) executes.
///
/// Every builtin directive updates the state as a side effect of emitting its
/// escape code. Extension functions see the state as it stands at their call
/// site through [`CallContext`](crate::CallContext).
///
/// The `Display` form lists all four attributes back as directives, always in
/// the order foreground, background, bold, reverse:
///
/// ```rust
/// use huelog_style::State;
///
/// let state = State { foreground: Some(1), ..State::default() };
/// assert_eq!(state.to_string(), "{fg 1}{nobg}{nobold}{noreverse}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct State {
    pub foreground: Option<u8>,
    pub background: Option<u8>,
    pub bold: bool,
    pub reverse: bool,
}

impl State {
    /// True when no attribute is set.
    pub fn is_plain(&self) -> bool {
        *self == State::default()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.foreground {
            Some(color) => write!(f, "{{fg {}}}", color)?,
            None => f.write_str("{nofg}")?,
        }
        match self.background {
            Some(color) => write!(f, "{{bg {}}}", color)?,
            None => f.write_str("{nobg}")?,
        }
        f.write_str(if self.bold { "{bold}" } else { "{nobold}" })?;
        f.write_str(if self.reverse {
            "{reverse}"
        } else {
            "{noreverse}"
        })
    }
}
