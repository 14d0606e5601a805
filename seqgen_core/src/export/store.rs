//! Append-only structured store for sequences.
//!
//! Records are JSON lines tagged with a group name and their
//! `(initial, length)` key. Writing skips keys the group already holds,
//! so re-exporting a collection never duplicates entries. Several groups
//! can share one file.

use super::Exporter;
use crate::{Result, Sequence, SequenceCollection, SequenceKey};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// One stored sequence with its key as metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredSequence {
    pub group: String,
    pub initial: usize,
    pub length: usize,
    pub values: Sequence,
    pub stored_at: DateTime<Utc>,
}

impl StoredSequence {
    pub fn key(&self) -> SequenceKey {
        SequenceKey::new(self.initial, self.length)
    }
}

/// Handle on one group within a store file
pub struct SequenceStore {
    path: PathBuf,
    group: String,
}

impl SequenceStore {
    pub fn new(path: impl Into<PathBuf>, group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: group.into(),
        }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append entries whose keys the group does not hold yet.
    ///
    /// Returns the number of entries appended.
    pub fn append_new(&self, collection: &SequenceCollection) -> Result<usize> {
        if collection.is_empty() {
            tracing::info!("Nothing to store in group '{}'", self.group);
            return Ok(0);
        }

        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // Hold the lock across read and append so concurrent writers
        // cannot both add the same key
        file.lock_exclusive()?;

        let existing: BTreeSet<SequenceKey> = parse_records(BufReader::new(&file))?
            .into_iter()
            .filter(|r| r.group == self.group)
            .map(|r| r.key())
            .collect();

        let needs_newline = ends_mid_line(&file)?;
        if needs_newline {
            tracing::warn!("Store {:?} ends with a partial line; terminating it", self.path);
        }

        let stored_at = Utc::now();
        let mut appended = 0;
        {
            let mut writer = BufWriter::new(&file);
            if needs_newline {
                writer.write_all(b"\n")?;
            }
            for (key, sequence) in collection {
                if existing.contains(key) {
                    tracing::debug!("Key {} already stored in '{}', skipping", key, self.group);
                    continue;
                }

                let record = StoredSequence {
                    group: self.group.clone(),
                    initial: key.initial,
                    length: key.length,
                    values: sequence.clone(),
                    stored_at,
                };
                let line = serde_json::to_string(&record)?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
                appended += 1;
            }
            writer.flush()?;
        }

        file.sync_all()?;
        file.unlock()?;

        tracing::info!(
            "Stored {} new sequences in group '{}' ({} already present)",
            appended,
            self.group,
            collection.len() - appended
        );
        Ok(appended)
    }

    /// Load every sequence of this group
    pub fn read(&self) -> Result<SequenceCollection> {
        Ok(self
            .records()?
            .into_iter()
            .map(|r| (r.key(), r.values))
            .collect())
    }

    /// Keys held by this group
    pub fn keys(&self) -> Result<BTreeSet<SequenceKey>> {
        Ok(self.records()?.iter().map(StoredSequence::key).collect())
    }

    fn records(&self) -> Result<Vec<StoredSequence>> {
        Ok(read_records(&self.path)?
            .into_iter()
            .filter(|r| r.group == self.group)
            .collect())
    }
}

impl Exporter for SequenceStore {
    fn export(&mut self, collection: &SequenceCollection) -> Result<usize> {
        self.append_new(collection)
    }
}

/// Read every well-formed record from a store file, across all groups
pub fn read_records(path: &Path) -> Result<Vec<StoredSequence>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;
    let records = parse_records(BufReader::new(&file));
    file.unlock()?;

    let records = records?;
    tracing::debug!("Read {} stored sequences from {:?}", records.len(), path);
    Ok(records)
}

/// Load one group of a store file as a collection
pub fn read_store(path: &Path, group: &str) -> Result<SequenceCollection> {
    SequenceStore::new(path, group).read()
}

/// Keys stored under `group`
pub fn stored_keys(path: &Path, group: &str) -> Result<BTreeSet<SequenceKey>> {
    SequenceStore::new(path, group).keys()
}

/// Group names present in a store file
pub fn stored_groups(path: &Path) -> Result<BTreeSet<String>> {
    Ok(read_records(path)?.into_iter().map(|r| r.group).collect())
}

/// Whether the file is non-empty and its last byte is not a newline,
/// as left behind by an interrupted writer
fn ends_mid_line(file: &File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut reader = file;
    reader.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    reader.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn parse_records<R: Read>(reader: BufReader<R>) -> Result<Vec<StoredSequence>> {
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<StoredSequence>(&line) {
            Ok(record) if record.values.len() == record.key().expected_len() => {
                records.push(record)
            }
            Ok(record) => {
                tracing::warn!(
                    "Stored sequence {} at line {} has {} values, expected {}; ignoring",
                    record.key(),
                    line_num + 1,
                    record.values.len(),
                    record.key().expected_len()
                );
            }
            Err(e) => {
                tracing::warn!("Failed to parse stored sequence at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    Ok(records)
}
