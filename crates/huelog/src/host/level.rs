//! Log severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log record, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Level {
    /// Every level, in severity order.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Lowercase name, as used by `{onlevel "<name>" ...}` directives.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Uppercase label, as rendered by the `${level}` field.
    pub fn label(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a string names no level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name case-insensitively; `warn` is accepted for
    /// `warning`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Trace,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warning,
            log::Level::Error => Level::Error,
        }
    }
}

impl From<Level> for log::LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => log::LevelFilter::Trace,
            Level::Debug => log::LevelFilter::Debug,
            Level::Info => log::LevelFilter::Info,
            Level::Warning => log::LevelFilter::Warn,
            Level::Error | Level::Fatal => log::LevelFilter::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_labels() {
        assert_eq!(Level::Warning.as_str(), "warning");
        assert_eq!(Level::Warning.label(), "WARNING");
        assert_eq!(Level::Fatal.to_string(), "FATAL");
        assert_eq!(format!("{:<7}|", Level::Info), "INFO   |");
    }

    #[test]
    fn ordered_by_severity() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Error < Level::Fatal);
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
        assert_eq!(" Info ".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(
            "loud".parse::<Level>().unwrap_err().to_string(),
            r#"unknown log level: "loud""#
        );
    }

    #[test]
    fn round_trips_every_name() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
            assert_eq!(level.label().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn log_crate_conversions() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(log::LevelFilter::from(Level::Fatal), log::LevelFilter::Error);
        assert_eq!(log::LevelFilter::from(Level::Trace), log::LevelFilter::Trace);
    }
}
