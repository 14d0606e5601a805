//! CSV rendering with one column per sequence term.
//!
//! Header is `initial,length,S0,…,S{N-1}`, so every entry must have the
//! same number of terms.

use super::Exporter;
use crate::{Error, Result, SequenceCollection};
use std::io::Write;

/// CSV exporter over any writer
pub struct CsvExporter<W: Write> {
    writer: W,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Common term count of the collection, or an error naming the first
/// entry that differs.
fn common_width(collection: &SequenceCollection) -> Result<usize> {
    let mut entries = collection.iter();
    let expected = match entries.next() {
        Some((_, first)) => first.len(),
        None => return Ok(0),
    };

    for (key, sequence) in entries {
        if sequence.len() != expected {
            return Err(Error::HeterogeneousLength {
                key: *key,
                expected,
                found: sequence.len(),
            });
        }
    }
    Ok(expected)
}

impl<W: Write> Exporter for CsvExporter<W> {
    fn export(&mut self, collection: &SequenceCollection) -> Result<usize> {
        // Check before writing so a bad collection leaves no partial table
        let width = common_width(collection)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut self.writer);

        let mut header = vec!["initial".to_string(), "length".to_string()];
        header.extend((0..width).map(|i| format!("S{}", i)));
        writer.write_record(&header)?;

        for (key, sequence) in collection {
            let mut row = Vec::with_capacity(width + 2);
            row.push(key.initial.to_string());
            row.push(key.length.to_string());
            row.extend(sequence.iter().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        tracing::debug!("Wrote {} CSV rows with {} terms", collection.len(), width);
        Ok(collection.len())
    }
}
