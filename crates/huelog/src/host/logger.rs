use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;

use super::format::Format;
use super::level::Level;
use super::output::{LevelWrite, PlainOutput};
use super::Formatter;
use crate::restorer::StyleMemory;
use crate::theme::Theme;

/// Format used by [`Log::new`].
pub const DEFAULT_FORMAT: &str = "${time} ${level:[%s]:right} %s";

/// A logger: a header formatter, a level-aware sink and a threshold.
///
/// Each record is the rendered header with the message in place of its
/// first `%s` (or after a space when there is none), terminated by `\n`.
/// Records below the threshold are dropped; write failures are ignored.
///
/// ```rust
/// use huelog::host::{Format, Level, Log, PlainOutput};
///
/// let mut log = Log::new();
/// log.set_format(Format::new("${level} %s"));
/// log.set_output(PlainOutput(std::io::sink()));
/// log.set_level(Level::Warning);
///
/// assert!(!log.enabled(Level::Info));
/// log.error("disk full");
/// ```
pub struct Log {
    formatter: Box<dyn Formatter + Send + Sync>,
    output: Mutex<Box<dyn LevelWrite + Send>>,
    level: Level,
    prefix: String,
}

impl Log {
    /// A logger writing [`DEFAULT_FORMAT`] records of `Info` and above to
    /// stderr.
    pub fn new() -> Self {
        Self {
            formatter: Box::new(Format::new(DEFAULT_FORMAT)),
            output: Mutex::new(Box::new(PlainOutput(io::stderr()))),
            level: Level::Info,
            prefix: String::new(),
        }
    }

    pub fn set_format<F>(&mut self, formatter: F)
    where
        F: Formatter + Send + Sync + 'static,
    {
        self.formatter = Box::new(formatter);
    }

    pub fn set_output<O>(&mut self, output: O)
    where
        O: LevelWrite + Send + 'static,
    {
        self.output = Mutex::new(Box::new(output));
    }

    /// Installs both halves of a theme: its line formatter and its
    /// multi-line aware output.
    pub fn set_theme<W, M>(&mut self, theme: Theme<W, M>)
    where
        W: Write + Send + 'static,
        M: StyleMemory + Send + Sync + 'static,
    {
        let (formatter, output) = theme.into_parts();
        self.set_format(formatter);
        self.set_output(output);
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Sets the minimum level that gets written.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Sets the value of the `${prefix}` field.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Writes one record at `level`.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }

        let message = message.to_string();

        // One record at a time: a styled header's store/restore scope spans
        // the whole render.
        let mut output = self.output.lock();
        let header = self.formatter.render(level, &self.prefix);
        let mut record = compose(&header, &message);
        record.push('\n');
        let _ = output.write_with_level(record.as_bytes(), level);
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Writes a `Fatal` record. The process keeps running.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Level::Fatal, message);
    }

    /// Makes this logger the global [`log`] backend.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.level.into();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log")
            .field("level", &self.level)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl log::Log for Log {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Log::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        Log::log(self, record.level().into(), record.args());
    }

    fn flush(&self) {
        let _ = self.output.lock().flush();
    }
}

fn compose(header: &str, message: &str) -> String {
    if header.contains("%s") {
        header.replacen("%s", message, 1)
    } else if header.is_empty() {
        message.to_string()
    } else {
        format!("{} {}", header, message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl LevelWrite for Capture {
        fn write_with_level(&mut self, data: &[u8], level: Level) -> io::Result<usize> {
            self.0
                .lock()
                .push((level, String::from_utf8_lossy(data).into_owned()));
            Ok(data.len())
        }
    }

    fn capture(format: &str) -> (Log, Capture) {
        let capture = Capture::default();
        let mut log = Log::new();
        log.set_format(Format::new(format));
        log.set_output(capture.clone());
        log.set_level(Level::Trace);
        (log, capture)
    }

    #[test]
    fn message_replaces_marker() {
        let (log, capture) = capture("${level} %s!");
        log.error("hello");
        assert_eq!(*capture.0.lock(), vec![(Level::Error, "ERROR hello!\n".to_string())]);
    }

    #[test]
    fn message_appended_without_marker() {
        let (log, capture) = capture("${level}");
        log.info("hello");
        assert_eq!(capture.0.lock()[0].1, "INFO hello\n");
    }

    #[test]
    fn only_first_marker_replaced() {
        let (log, capture) = capture("%s %s");
        log.info("a");
        assert_eq!(capture.0.lock()[0].1, "a %s\n");
    }

    #[test]
    fn threshold_filters() {
        let (mut log, capture) = capture("${level} %s");
        log.set_level(Level::Warning);
        log.info("dropped");
        log.warning("kept");
        log.fatal("kept");
        let levels: Vec<Level> = capture.0.lock().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![Level::Warning, Level::Fatal]);
    }

    #[test]
    fn every_level_method() {
        let (log, capture) = capture("${level:%s:left}|%s");
        log.trace("t");
        log.debug("d");
        log.info("i");
        log.warning("w");
        log.error("e");
        log.fatal("f");
        let lines: Vec<String> = capture.0.lock().iter().map(|(_, line)| line.clone()).collect();
        assert_eq!(
            lines,
            vec![
                "TRACE  |t\n",
                "DEBUG  |d\n",
                "INFO   |i\n",
                "WARNING|w\n",
                "ERROR  |e\n",
                "FATAL  |f\n",
            ]
        );
    }

    #[test]
    fn prefix_field() {
        let (mut log, capture) = capture("${prefix}: %s");
        log.set_prefix("db");
        log.info("up");
        assert_eq!(capture.0.lock()[0].1, "db: up\n");
    }

    #[test]
    fn log_facade_records() {
        let (log, capture) = capture("${level} %s");
        log::Log::log(
            &log,
            &log::Record::builder()
                .level(log::Level::Warn)
                .args(format_args!("{} items", 3))
                .build(),
        );
        assert_eq!(capture.0.lock()[0], (Level::Warning, "WARNING 3 items\n".to_string()));
    }

    #[test]
    fn write_errors_are_swallowed() {
        struct Broken;
        impl LevelWrite for Broken {
            fn write_with_level(&mut self, _: &[u8], _: Level) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "closed"))
            }
        }

        let mut log = Log::new();
        log.set_output(Broken);
        log.error("ignored");
    }
}
