#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use huelog::host::{Format, Formatter, Level, Log, PlainOutput};
use parking_lot::Mutex;

/// A cloneable in-memory writer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Returns the contents and empties the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A logger at `Trace` writing `formatter`'s records into a buffer.
pub fn capture<F>(formatter: F) -> (Log, SharedBuffer)
where
    F: Formatter + Send + Sync + 'static,
{
    let buffer = SharedBuffer::default();
    let mut log = Log::new();
    log.set_format(formatter);
    log.set_output(PlainOutput(buffer.clone()));
    log.set_level(Level::Trace);
    (log, buffer)
}

/// A logger with a plain host format, for comparison.
pub fn capture_plain(format: &str) -> (Log, SharedBuffer) {
    capture(Format::new(format))
}

/// Builtin-directive template to escapes.
pub fn styled(template: &str) -> String {
    huelog_style::render(template).expect("valid template")
}
