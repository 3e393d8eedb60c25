//! Level-colored themes.
//!
//! A theme is built from a plain line format and a [`ThemePalette`]. The
//! format is wrapped so that:
//!
//! - the whole line is drawn in the level's `first` style,
//! - the `${level}` field (with the whitespace around it) is additionally
//!   drawn in the level's `level` style for `error` and `fatal`, then reset,
//!   after which the `first` style is restored for the message,
//! - the line ends with a reset,
//! - the second line of a multi-line record starts with the level's
//!   `trail` style.
//!
//! The palette is substituted into fixed skeletons with [`minijinja`], and
//! the result compiled like any other format.
//!
//! ```rust
//! use huelog::host::{Level, Log};
//! use huelog::theme::DARK;
//!
//! let theme = huelog::apply_default_theme("${level} %s", &DARK).unwrap();
//! let mut log = Log::new();
//! log.set_theme(theme.with_writer(std::io::sink()));
//! log.error("failed");
//! ```

mod output;
mod palette;

use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;

pub use self::output::ThemeOutput;
pub use self::palette::{LevelStyle, ThemePalette, DARK, DEFAULT, LIGHT};

use crate::compiler::Compiler;
use crate::error::Error;
use crate::formatter::StyledFormatter;
use crate::restorer::{Locked, StyleMemory};

/// Matches the level field and the whitespace around it.
static LEVEL_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\$\{level[^}]*\}\s*").expect("level field pattern"));

/// Prepended to the format: the level's first-line style, then stored.
const LINE_SKELETON: &str = concat!(
    r#"{ontrace "{{ trace.first }}"}"#,
    r#"{ondebug "{{ debug.first }}"}"#,
    r#"{oninfo "{{ info.first }}"}"#,
    r#"{onwarning "{{ warning.first }}"}"#,
    r#"{onerror "{{ error.first }}"}"#,
    r#"{onfatal "{{ fatal.first }}"}"#,
    "{store}",
);

/// Replaces the level field; `$0` is the matched text.
const LEVEL_SKELETON: &str =
    r#"{onerror "{{ error.level }}"}{onfatal "{{ fatal.level }}"}$0{reset}{restore}"#;

/// Emitted after the first line break of a multi-line record.
const TRAIL_SKELETON: &str = concat!(
    r#"{ontrace "{{ trace.trail }}"}"#,
    r#"{ondebug "{{ debug.trail }}"}"#,
    r#"{oninfo "{{ info.trail }}"}"#,
    r#"{onwarning "{{ warning.trail }}"}"#,
    r#"{onerror "{{ error.trail }}"}"#,
    r#"{onfatal "{{ fatal.trail }}"}"#,
);

/// A line formatter and the matching multi-line aware output.
#[derive(Debug)]
pub struct Theme<W = console::Term, M: StyleMemory = Locked> {
    formatter: StyledFormatter<M>,
    output: ThemeOutput<W, M>,
}

impl<W, M: StyleMemory> Theme<W, M> {
    pub fn formatter(&self) -> &StyledFormatter<M> {
        &self.formatter
    }

    pub fn output(&self) -> &ThemeOutput<W, M> {
        &self.output
    }

    /// Replaces the destination the output writes to.
    pub fn with_writer<V>(self, writer: V) -> Theme<V, M> {
        Theme {
            formatter: self.formatter,
            output: self.output.with_writer(writer),
        }
    }

    pub fn into_parts(self) -> (StyledFormatter<M>, ThemeOutput<W, M>) {
        (self.formatter, self.output)
    }
}

pub(crate) fn build<M: StyleMemory>(
    compiler: &Compiler,
    formatting: &str,
    palette: &ThemePalette,
) -> Result<Theme<console::Term, M>, Error> {
    let line = format!(
        "{}{}",
        LINE_SKELETON,
        LEVEL_FIELD.replace_all(formatting, LEVEL_SKELETON)
    );
    let line = substitute(&line, palette)?;
    let formatter = compiler.compile_with_reset(&line)?;

    let trail = substitute(TRAIL_SKELETON, palette)?;
    let trailer = compiler.compile(&trail)?;

    log::debug!("built theme for format {:?}", formatting);
    Ok(Theme {
        formatter,
        output: ThemeOutput::new(console::Term::stderr(), trailer),
    })
}

fn substitute(skeleton: &str, palette: &ThemePalette) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    Ok(env.render_str(skeleton, palette)?)
}
