//! Plain-text rendering, one entry per line.

use super::Exporter;
use crate::{Result, SequenceCollection};
use std::io::Write;

/// Writes `(initial, length) : [v0, v1, …]` lines
pub struct TextExporter<W: Write> {
    writer: W,
}

impl<W: Write> TextExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for TextExporter<W> {
    fn export(&mut self, collection: &SequenceCollection) -> Result<usize> {
        for (key, sequence) in collection {
            writeln!(self.writer, "{} : {}", key, sequence)?;
        }
        self.writer.flush()?;
        Ok(collection.len())
    }
}
