// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSON-lines journal of completed builds.
//!
//! Each line is one [`JournalEntry`]. Replaying the journal in order rebuilds
//! a [`BuildStore`]. A torn final line (the process died mid-write) is
//! skipped with a warning; damage anywhere else is an error.

use crate::store::{BuildStore, StoreError};
use culprit_core::BuildRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt journal entry at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("journal entry {seq} rejected: {source}")]
    Rejected {
        seq: u64,
        #[source]
        source: StoreError,
    },
}

/// One line of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub build: BuildRecord,
}

/// Writer half of the journal.
pub struct Journal {
    path: PathBuf,
    file: File,
    write_seq: u64,
}

impl Journal {
    /// Open (or create) the journal at `path`, positioned for appending.
    ///
    /// Anything after the last intact entry is cut off before appending.
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let scan = scan(path)?;
        if scan.intact_len < scan.file_len {
            OpenOptions::new().write(true).open(path)?.set_len(scan.intact_len as u64)?;
            if scan.torn_tail {
                tracing::warn!(
                    path = %path.display(),
                    dropped_bytes = scan.file_len - scan.intact_len,
                    "truncated journal after last intact entry"
                );
            }
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if scan.unterminated {
            file.write_all(b"\n")?;
        }
        let write_seq = scan.entries.last().map_or(0, |entry| entry.seq);
        Ok(Self { path: path.to_path_buf(), file, write_seq })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequence number of the last entry written.
    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    /// Append a build and flush it to disk. Returns the entry's sequence number.
    pub fn append(&mut self, build: &BuildRecord) -> Result<u64, JournalError> {
        let seq = self.write_seq + 1;
        let mut line = serde_json::to_vec(&JournalEntry { seq, build: build.clone() })?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.flush()?;
        self.write_seq = seq;
        tracing::debug!(seq, build = %build.key(), "journaled build");
        Ok(seq)
    }

    /// Read every entry in the journal. A missing file reads as empty.
    pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(scan(path)?.entries)
    }

    /// Rebuild a store by replaying the journal at `path`.
    pub fn load(path: &Path) -> Result<BuildStore, JournalError> {
        let store = BuildStore::new();
        let entries = Self::read_entries(path)?;
        let count = entries.len();
        for entry in entries {
            store
                .append(entry.build)
                .map_err(|source| JournalError::Rejected { seq: entry.seq, source })?;
        }
        tracing::info!(path = %path.display(), builds = count, "replayed build journal");
        Ok(store)
    }
}

struct Scan {
    entries: Vec<JournalEntry>,
    /// Byte offset just past the last intact entry
    intact_len: usize,
    /// The last intact entry ends the file without a newline
    unterminated: bool,
    torn_tail: bool,
    file_len: usize,
}

/// Parse the raw journal bytes line by line.
///
/// Lines are split on `\n` before decoding, so a write torn inside a
/// multibyte character only damages the final line.
fn scan(path: &Path) -> Result<Scan, JournalError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    let lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    let last_content = lines.iter().rposition(|l| !is_blank(l));

    let mut scan = Scan {
        entries: Vec::new(),
        intact_len: 0,
        unterminated: false,
        torn_tail: false,
        file_len: data.len(),
    };
    let mut offset = 0;
    for (idx, line) in lines.iter().enumerate() {
        offset += line.len() + 1;
        if is_blank(line) {
            continue;
        }
        match serde_json::from_slice::<JournalEntry>(line) {
            Ok(entry) => {
                scan.entries.push(entry);
                scan.intact_len = offset.min(data.len());
                scan.unterminated = offset > data.len();
            }
            Err(source) if Some(idx) == last_content => {
                scan.torn_tail = true;
                tracing::warn!(
                    path = %path.display(),
                    line = idx + 1,
                    error = %source,
                    "skipping torn journal tail"
                );
            }
            Err(source) => {
                return Err(JournalError::Corrupt {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source,
                });
            }
        }
    }
    Ok(scan)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
