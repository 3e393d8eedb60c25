use std::borrow::Cow;
use std::io::{self, Write};

use crate::formatter::StyledFormatter;
use crate::host::{Level, LevelWrite};
use crate::restorer::{Locked, StyleMemory};

/// Theme-aware output: writes records to `W`, inserting the level's trail
/// style after the first line break of a multi-line record.
///
/// A single trailing `\n` terminates the record and does not make it
/// multi-line.
#[derive(Debug)]
pub struct ThemeOutput<W, M: StyleMemory = Locked> {
    writer: W,
    trailer: StyledFormatter<M>,
}

impl<W, M: StyleMemory> ThemeOutput<W, M> {
    pub(crate) fn new(writer: W, trailer: StyledFormatter<M>) -> Self {
        Self { writer, trailer }
    }

    /// Returns `data` with the trail style spliced in, if it spans lines.
    pub fn splice<'a>(&self, data: &'a [u8], level: Level) -> Cow<'a, [u8]> {
        let body = data.strip_suffix(b"\n").unwrap_or(data);
        let Some(newline) = body.iter().position(|&byte| byte == b'\n') else {
            return Cow::Borrowed(data);
        };

        let trail = self.trailer.render(level, "");
        let mut spliced = Vec::with_capacity(data.len() + trail.len());
        spliced.extend_from_slice(&data[..=newline]);
        spliced.extend_from_slice(trail.as_bytes());
        spliced.extend_from_slice(&data[newline + 1..]);
        Cow::Owned(spliced)
    }

    pub fn trailer(&self) -> &StyledFormatter<M> {
        &self.trailer
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub(crate) fn with_writer<V>(self, writer: V) -> ThemeOutput<V, M> {
        ThemeOutput {
            writer,
            trailer: self.trailer,
        }
    }
}

impl<W: Write, M: StyleMemory> LevelWrite for ThemeOutput<W, M> {
    fn write_with_level(&mut self, data: &[u8], level: Level) -> io::Result<usize> {
        let spliced = self.splice(data, level);
        self.writer.write_all(&spliced)?;
        Ok(spliced.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
