//! Per-level style fragments.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::host::Level;

/// The style fragments of one level.
///
/// Each field is a style template of builtin directives, such as
/// `"{bold}{fg 9}"`:
///
/// - `first`: applied to the first line of a record and stored, so the
///   message after the level label is drawn in it again.
/// - `trail`: emitted at the start of the second line of a multi-line
///   record.
/// - `level`: applied to the level label only (used by `error` and `fatal`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelStyle {
    pub first: Cow<'static, str>,
    pub trail: Cow<'static, str>,
    pub level: Cow<'static, str>,
}

impl LevelStyle {
    pub const fn new(first: &'static str, trail: &'static str, level: &'static str) -> Self {
        Self {
            first: Cow::Borrowed(first),
            trail: Cow::Borrowed(trail),
            level: Cow::Borrowed(level),
        }
    }

    /// A style with only a first-line fragment.
    pub const fn first(first: &'static str) -> Self {
        Self::new(first, "", "")
    }
}

/// Style fragments for all six levels.
///
/// Palettes can be written as YAML; missing levels and fields are empty:
///
/// ```rust
/// use huelog::theme::ThemePalette;
///
/// let palette = ThemePalette::from_yaml(r#"
/// error:
///   first: "{bold}{fg 1}"
///   level: "{reverse}"
/// "#).unwrap();
///
/// assert_eq!(palette.error.first, "{bold}{fg 1}");
/// assert_eq!(palette.info.first, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePalette {
    pub trace: LevelStyle,
    pub debug: LevelStyle,
    pub info: LevelStyle,
    pub warning: LevelStyle,
    pub error: LevelStyle,
    pub fatal: LevelStyle,
}

impl ThemePalette {
    /// Parses a palette from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn get(&self, level: Level) -> &LevelStyle {
        match level {
            Level::Trace => &self.trace,
            Level::Debug => &self.debug,
            Level::Info => &self.info,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
            Level::Fatal => &self.fatal,
        }
    }

    /// Looks up a builtin palette by name: `dark`, `light` or `default`.
    pub fn named(name: &str) -> Option<&'static ThemePalette> {
        match name {
            "dark" => Some(&DARK),
            "light" => Some(&LIGHT),
            "default" => Some(&DEFAULT),
            _ => None,
        }
    }
}

/// For dark terminal backgrounds.
pub static DARK: ThemePalette = ThemePalette {
    trace: LevelStyle::first("{fg 243}"),
    debug: LevelStyle::first("{fg 250}"),
    info: LevelStyle::first("{fg 110}"),
    warning: LevelStyle::first("{fg 178}"),
    error: LevelStyle::new("{fg 202}", "", "{bold}{bg 52}"),
    fatal: LevelStyle::first("{bold}{fg 197}{bg 17}"),
};

/// For light terminal backgrounds.
pub static LIGHT: ThemePalette = ThemePalette {
    trace: LevelStyle::first("{fg 250}"),
    debug: LevelStyle::first("{fg 243}"),
    info: LevelStyle::first("{fg 26}"),
    warning: LevelStyle::first("{fg 167}{bg 230}"),
    error: LevelStyle::new("{bold}{fg 161}", "", "{reverse}{bold}{bg 231}"),
    fatal: LevelStyle::first("{bold}{fg 231}{bg 124}"),
};

/// Works on either background.
pub static DEFAULT: ThemePalette = ThemePalette {
    trace: LevelStyle::first("{nofg}"),
    debug: LevelStyle::first("{fg 31}"),
    info: LevelStyle::first("{fg 33}"),
    warning: LevelStyle::new("{bold}{fg 172}", "{nobold}", ""),
    error: LevelStyle::new("{bold}{fg 9}", "{reset}{fg 9}", "{bold}{fg 231}{bg 196}"),
    fatal: LevelStyle::new(
        "{bold}{fg 231}{bg 124}",
        "{reset}{bold}{fg 231}",
        "{bold}{fg 231}{bg 196}",
    ),
};
