use huelog_style::{Style, STYLE_RESET};

use crate::error::Error;
use crate::formatter::StyledFormatter;
use crate::host::Format;
use crate::inserter::Inserter;
use crate::preprocess::preprocess;
use crate::restorer::StyleMemory;
use crate::theme::{self, Theme, ThemePalette};

/// Compiles style-annotated formats into [`StyledFormatter`]s.
///
/// Carries the one piece of configuration compilation depends on: whether
/// escape sequences are emitted at all. With styling off every directive
/// still parses and runs, so errors are reported the same way, but the
/// compiled format contains no escapes.
///
/// ```rust
/// use huelog::host::Level;
/// use huelog::Compiler;
///
/// let formatter = Compiler::new().styling(false).format("{bold}${level}{reset} %s").unwrap();
/// assert_eq!(formatter.render(Level::Info, ""), "INFO %s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    styling: bool,
}

impl Compiler {
    /// A compiler that emits escape sequences.
    pub fn new() -> Self {
        Self { styling: true }
    }

    /// Styling follows whether stderr gets colors, as decided by
    /// [`console`] (terminal detection, `NO_COLOR`, `CLICOLOR_FORCE`).
    pub fn from_env() -> Self {
        Self {
            styling: console::colors_enabled_stderr(),
        }
    }

    pub fn styling(mut self, enabled: bool) -> Self {
        self.styling = enabled;
        self
    }

    pub fn is_styling(&self) -> bool {
        self.styling
    }

    /// Compiles `formatting` into a thread-safe formatter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] when the top-level format does not compile
    /// or execute. Errors inside `onlevel` fragments do not fail; they
    /// become visible markers in the output.
    pub fn format(&self, formatting: &str) -> Result<StyledFormatter, Error> {
        self.compile(formatting)
    }

    /// Like [`format`](Self::format), with a trailing `{reset}`.
    pub fn format_with_reset(&self, formatting: &str) -> Result<StyledFormatter, Error> {
        self.compile_with_reset(formatting)
    }

    /// Compiles `formatting` with a chosen restorer memory.
    pub fn compile<M: StyleMemory>(&self, formatting: &str) -> Result<StyledFormatter<M>, Error> {
        let template = preprocess(formatting);
        let mut style = Style::compile(&template, &Inserter::new(self.styling).functions())?
            .with_styling(self.styling);
        let compiled = style.execute()?;

        log::debug!("compiled format {:?} into {:?}", formatting, compiled);
        Ok(StyledFormatter::new(Format::new(&compiled)))
    }

    pub fn compile_with_reset<M: StyleMemory>(
        &self,
        formatting: &str,
    ) -> Result<StyledFormatter<M>, Error> {
        self.compile(&format!("{}{}", formatting, STYLE_RESET))
    }

    /// Builds a theme from a format and a palette, writing to stderr.
    pub fn apply_default_theme(
        &self,
        formatting: &str,
        palette: &ThemePalette,
    ) -> Result<Theme, Error> {
        self.build_theme(formatting, palette)
    }

    /// Builds a theme with a chosen restorer memory.
    pub fn build_theme<M: StyleMemory>(
        &self,
        formatting: &str,
        palette: &ThemePalette,
    ) -> Result<Theme<console::Term, M>, Error> {
        theme::build(self, formatting, palette)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
