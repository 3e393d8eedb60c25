use crate::host::{Format, Formatter, Level};
use crate::restorer::{Locked, Restorer, StyleMemory, ON_LEVEL, RESTORE, STORE};

/// A compiled, styled line format.
///
/// Wraps a host [`Format`] whose `onlevel`, `store` and `restore` fields are
/// resolved by this formatter's own [`Restorer`]. Every render starts by
/// clearing the stored style.
///
/// With the default [`Locked`] memory the formatter may be shared between
/// threads; with [`Unlocked`](crate::Unlocked) it may not.
#[derive(Debug)]
pub struct StyledFormatter<M: StyleMemory = Locked> {
    format: Format,
    restorer: Restorer<M>,
}

impl<M: StyleMemory> StyledFormatter<M> {
    pub(crate) fn new(format: Format) -> Self {
        Self {
            format,
            restorer: Restorer::new(),
        }
    }

    /// Renders the header for a record at `level`.
    pub fn render(&self, level: Level, prefix: &str) -> String {
        self.restorer.reset();
        self.format.render_with(level, prefix, |name, level, value| match name {
            ON_LEVEL => Some(self.restorer.handle_on_level(level, value)),
            STORE => Some(self.restorer.handle_store()),
            RESTORE => Some(self.restorer.handle_restore()),
            _ => None,
        })
    }

    /// Registers a handler for a custom `${name}` field.
    pub fn set_placeholder<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Level, &str) -> String + Send + Sync + 'static,
    {
        self.format.set_placeholder(name, handler);
    }

    /// The compiled host format.
    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn restorer(&self) -> &Restorer<M> {
        &self.restorer
    }
}

impl<M: StyleMemory> Formatter for StyledFormatter<M> {
    fn render(&self, level: Level, prefix: &str) -> String {
        StyledFormatter::render(self, level, prefix)
    }
}
