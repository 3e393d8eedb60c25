use std::io::{self, Write};

use super::level::Level;

/// A sink that receives each finished record together with its level.
pub trait LevelWrite {
    /// Writes one record, returning the number of bytes written.
    fn write_with_level(&mut self, data: &[u8], level: Level) -> io::Result<usize>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<L: LevelWrite + ?Sized> LevelWrite for Box<L> {
    fn write_with_level(&mut self, data: &[u8], level: Level) -> io::Result<usize> {
        (**self).write_with_level(data, level)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Writes records unchanged, ignoring their level.
#[derive(Debug, Default)]
pub struct PlainOutput<W>(pub W);

impl<W: Write> LevelWrite for PlainOutput<W> {
    fn write_with_level(&mut self, data: &[u8], _level: Level) -> io::Result<usize> {
        self.0.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
