//! Exporters consuming a [`SequenceCollection`].
//!
//! - `text`: one `(initial, length) : [..]` line per entry
//! - `tabular`: CSV with one column per term
//! - `store`: append-only JSON Lines store, deduplicated by key

pub mod store;
pub mod tabular;
pub mod text;

pub use store::{read_store, stored_groups, stored_keys, SequenceStore, StoredSequence};
pub use tabular::CsvExporter;
pub use text::TextExporter;

use crate::{Error, Result, SequenceCollection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Something that consumes a collection and writes it somewhere
pub trait Exporter {
    /// Write the collection, returning the number of entries written
    fn export(&mut self, collection: &SequenceCollection) -> Result<usize>;
}

/// Output format selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Store,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "csv" | "tabular" => Ok(Self::Csv),
            "store" | "jsonl" | "structured" => Ok(Self::Store),
            other => Err(Error::Config(format!(
                "Unknown output format '{}' (expected text, csv or store)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Store => "store",
        };
        f.write_str(name)
    }
}

/// Export `collection` in `format`.
///
/// Text and CSV go to `output` when given (written atomically) or to
/// stdout otherwise. The store format appends to `output` under `group`
/// and requires a path.
pub fn export_collection(
    collection: &SequenceCollection,
    format: OutputFormat,
    output: Option<&Path>,
    group: &str,
) -> Result<usize> {
    match (format, output) {
        (OutputFormat::Text, Some(path)) => {
            write_file_atomic(path, |w| TextExporter::new(w).export(collection))
        }
        (OutputFormat::Text, None) => {
            TextExporter::new(std::io::stdout().lock()).export(collection)
        }
        (OutputFormat::Csv, Some(path)) => {
            write_file_atomic(path, |w| CsvExporter::new(w).export(collection))
        }
        (OutputFormat::Csv, None) => CsvExporter::new(std::io::stdout().lock()).export(collection),
        (OutputFormat::Store, Some(path)) => SequenceStore::new(path, group).export(collection),
        (OutputFormat::Store, None) => Err(Error::Config(
            "The store format needs an output file".into(),
        )),
    }
}

/// Replace `path` with whatever `write` produces.
///
/// Content goes to a temp file in the same directory which is synced and
/// then renamed over `path`, so readers see the old or the new file.
pub fn write_file_atomic<F>(path: &Path, write: F) -> Result<usize>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<usize>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;

    let written = {
        let mut writer = BufWriter::new(temp.as_file());
        let written = write(&mut writer)?;
        writer.flush()?;
        written
    };

    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {} entries to {:?}", written, path);
    Ok(written)
}
