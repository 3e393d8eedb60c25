//! Field-substituting line format.
//!
//! A [`Format`] is parsed once from a string containing `${name}` or
//! `${name:value}` fields and rendered once per record. Everything outside a
//! field is copied through untouched, so a format may carry escape sequences
//! or a `%s` message marker.
//!
//! Builtin fields:
//!
//! | field | renders |
//! |---|---|
//! | `${level}` | the uppercase level label, `ERROR` |
//! | `${level:FMT}` | `FMT` with `%s` replaced by the label, `${level:[%s]}` → `[ERROR]` |
//! | `${level:FMT:left}` / `${level:FMT:right}` | the same, label padded to 7 columns |
//! | `${prefix}` | the prefix passed to [`Formatter::render`] |
//! | `${time}` | local time, `%Y-%m-%d %H:%M:%S` |
//! | `${time:FMT}` | local time with a strftime format |
//!
//! Unknown fields are rendered verbatim.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use super::level::Level;
use super::Formatter;

/// Default strftime format of the `${time}` field.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width the `left`/`right` level alignments pad to (the length of `WARNING`).
const LEVEL_WIDTH: usize = 7;

/// A custom field handler: receives the render level and the field value
/// (the part after the first `:`, or `""`).
pub type Placeholder = dyn Fn(Level, &str) -> String + Send + Sync;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        name: String,
        value: String,
        /// The field exactly as written, rendered when nothing handles it.
        raw: String,
    },
}

/// A parsed line format.
#[derive(Clone)]
pub struct Format {
    segments: Vec<Segment>,
    placeholders: HashMap<String, Arc<Placeholder>>,
}

impl Format {
    /// Parses `format`. Parsing never fails: an unterminated `${` is text.
    pub fn new(format: &str) -> Self {
        Self {
            segments: parse(format),
            placeholders: HashMap::new(),
        }
    }

    /// Registers a handler for `${name}` fields, overriding any builtin.
    pub fn set_placeholder<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Level, &str) -> String + Send + Sync + 'static,
    {
        self.placeholders.insert(name.into(), Arc::new(handler));
    }

    /// Names of the fields in this format, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders with an extra per-render resolver.
    ///
    /// `resolve` is consulted first for every field with
    /// `(name, level, value)`; returning `None` falls through to the
    /// registered handlers, then to the builtins.
    pub fn render_with<R>(&self, level: Level, prefix: &str, mut resolve: R) -> String
    where
        R: FnMut(&str, Level, &str) -> Option<String>,
    {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Field { name, value, raw } => {
                    if let Some(resolved) = resolve(name, level, value) {
                        output.push_str(&resolved);
                    } else if let Some(handler) = self.placeholders.get(name) {
                        output.push_str(&handler(level, value));
                    } else {
                        match name.as_str() {
                            "level" => output.push_str(&render_level(level, value)),
                            "prefix" => output.push_str(prefix),
                            "time" => render_time(&mut output, value),
                            _ => output.push_str(raw),
                        }
                    }
                }
            }
        }

        output
    }
}

impl Formatter for Format {
    fn render(&self, level: Level, prefix: &str) -> String {
        self.render_with(level, prefix, |_, _, _| None)
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut placeholders: Vec<&str> = self.placeholders.keys().map(String::as_str).collect();
        placeholders.sort_unstable();
        f.debug_struct("Format")
            .field("segments", &self.segments)
            .field("placeholders", &placeholders)
            .finish()
    }
}

fn parse(format: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = format;

    while let Some(start) = rest.find("${") {
        let Some(length) = rest[start..].find('}') else {
            break;
        };
        let end = start + length;

        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }

        let body = &rest[start + 2..end];
        let (name, value) = body.split_once(':').unwrap_or((body, ""));
        segments.push(Segment::Field {
            name: name.to_string(),
            value: value.to_string(),
            raw: rest[start..=end].to_string(),
        });

        rest = &rest[end + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    segments
}

fn render_level(level: Level, value: &str) -> String {
    if value.is_empty() {
        return level.label().to_string();
    }

    let (template, alignment) = match value.rsplit_once(':') {
        Some((template, alignment @ ("left" | "right"))) => (template, Some(alignment)),
        _ => (value, None),
    };

    let label = match alignment {
        Some("left") => format!("{:<width$}", level.label(), width = LEVEL_WIDTH),
        Some(_) => format!("{:>width$}", level.label(), width = LEVEL_WIDTH),
        None => level.label().to_string(),
    };

    if template.is_empty() {
        label
    } else {
        template.replacen("%s", &label, 1)
    }
}

fn render_time(output: &mut String, value: &str) {
    let pattern = if value.is_empty() {
        DEFAULT_TIME_FORMAT
    } else {
        value
    };

    let mut rendered = String::new();
    // An invalid strftime pattern makes the formatter fail; show it as is.
    if write!(rendered, "{}", chrono::Local::now().format(pattern)).is_err() {
        rendered = pattern.to_string();
    }
    output.push_str(&rendered);
}
