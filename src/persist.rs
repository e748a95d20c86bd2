// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persistence codec: indexes to flat text and back.
//!
//! # Line format
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ cell                                     │  key
//! │ 0a1b2c3d4e5f60718293a4b5c6d7e8f901234567 │  doc id (exactly doc_id_len bytes)
//! │ 1f2e3d4c5b6a79881726354453627180a9b8c7d6 │  doc id
//! │ virus                                    │  key (any other length)
//! │ 0a1b2c3d4e5f60718293a4b5c6d7e8f901234567 │
//! └──────────────────────────────────────────┘
//! ```
//!
//! No escaping and no delimiters. A line is a document id iff its byte length
//! equals the configured id length (40 for CORD-19 `paper_id`s); anything else
//! opens a new key. Consequences worth knowing:
//!
//! - a key whose length happens to equal `doc_id_len` is read back as an id;
//! - a key with no ids after it is dropped on read;
//! - keys containing a newline corrupt the file.
//!
//! The format is kept because existing `word_index.txt`/`author_index.txt`
//! files use it. The JSON `Snapshot` is the self-describing alternative.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::authors::AuthorIndex;
use crate::error::{Error, Result};
use crate::tree::IndexTree;
use crate::types::DocId;

/// Length of a CORD-19 `paper_id` (SHA-1 hex).
pub const DEFAULT_DOC_ID_LEN: usize = 40;

/// Current `Snapshot` layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Which on-disk representation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistFormat {
    /// `word_index.txt` + `author_index.txt`, compatible with existing files
    #[default]
    Lines,
    /// Single self-describing `index.json`
    Json,
}

/// Write one key and its postings, one token per line.
pub fn write_entry<W: Write>(sink: &mut W, key: &str, postings: &[DocId]) -> io::Result<()> {
    writeln!(sink, "{}", key)?;
    for doc_id in postings {
        writeln!(sink, "{}", doc_id)?;
    }
    Ok(())
}

/// Split a line-format stream back into `(key, postings)` pairs, in file order.
///
/// Ids that appear before any key have nowhere to go and are skipped.
pub fn parse_entries<R: BufRead>(reader: R, doc_id_len: usize) -> io::Result<Vec<(String, Vec<DocId>)>> {
    let mut entries = Vec::new();
    let mut current: Option<(String, Vec<DocId>)> = None;

    for line in reader.lines() {
        let line = line?;
        if line.len() == doc_id_len {
            match current.as_mut() {
                Some((_, postings)) => postings.push(DocId::new(line)),
                None => tracing::debug!(line = %line, "document id before any key, skipped"),
            }
            continue;
        }

        if let Some((key, postings)) = current.take() {
            if !postings.is_empty() {
                entries.push((key, postings));
            }
        }
        current = Some((line, Vec::new()));
    }

    if let Some((key, postings)) = current {
        if !postings.is_empty() {
            entries.push((key, postings));
        }
    }
    Ok(entries)
}

/// Rebuild a word index from the line format.
pub fn read_word_index<R: BufRead>(reader: R, doc_id_len: usize) -> io::Result<IndexTree> {
    let mut tree = IndexTree::new();
    for (key, postings) in parse_entries(reader, doc_id_len)? {
        for doc_id in postings {
            tree.insert(&key, doc_id);
        }
    }
    Ok(tree)
}

/// Rebuild an author index from the line format.
pub fn read_author_index<R: BufRead>(
    reader: R,
    doc_id_len: usize,
    bucket_count: usize,
) -> io::Result<AuthorIndex> {
    let mut index = AuthorIndex::new(bucket_count);
    for (author, postings) in parse_entries(reader, doc_id_len)? {
        for doc_id in postings {
            index.insert(&author, doc_id);
        }
    }
    Ok(index)
}

/// Write a tree to `path` in the line format.
pub fn save_word_index(tree: &IndexTree, path: &Path) -> Result<()> {
    write_file(path, |sink| tree.serialize(sink))
}

/// Write an author index to `path` in the line format.
pub fn save_author_index(index: &AuthorIndex, path: &Path) -> Result<()> {
    write_file(path, |sink| index.serialize(sink))
}

/// Load a word index file. A missing file is `Ok(None)`.
pub fn load_word_index(path: &Path, doc_id_len: usize) -> Result<Option<IndexTree>> {
    let Some(reader) = open_if_exists(path)? else {
        return Ok(None);
    };
    read_word_index(reader, doc_id_len)
        .map(Some)
        .map_err(|e| Error::io(path, e))
}

/// Load an author index file. A missing file is `Ok(None)`.
pub fn load_author_index(
    path: &Path,
    doc_id_len: usize,
    bucket_count: usize,
) -> Result<Option<AuthorIndex>> {
    let Some(reader) = open_if_exists(path)? else {
        return Ok(None);
    };
    read_author_index(reader, doc_id_len, bucket_count)
        .map(Some)
        .map_err(|e| Error::io(path, e))
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut sink = BufWriter::new(file);
    write(&mut sink)
        .and_then(|()| sink.flush())
        .map_err(|e| Error::io(path, e))
}

fn open_if_exists(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "index file not found");
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

// =============================================================================
// JSON SNAPSHOT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub postings: Vec<DocId>,
}

/// Both indexes in one self-describing document.
///
/// Unlike the line format this survives keys of any length and keeps
/// key-only entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub words: Vec<SnapshotEntry>,
    pub authors: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub fn capture(words: &IndexTree, authors: &AuthorIndex) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            words: words
                .iter()
                .map(|n| SnapshotEntry {
                    key: n.key().to_string(),
                    postings: n.postings().to_vec(),
                })
                .collect(),
            authors: authors
                .iter()
                .map(|e| SnapshotEntry {
                    key: e.author.clone(),
                    postings: e.postings.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild both indexes. Word counts come back as postings lengths.
    pub fn restore(self, bucket_count: usize) -> (IndexTree, AuthorIndex) {
        let mut words = IndexTree::new();
        for entry in self.words {
            if entry.postings.is_empty() {
                words.insert_key(&entry.key);
            }
            for doc_id in entry.postings {
                words.insert(&entry.key, doc_id);
            }
        }
        let mut authors = AuthorIndex::new(bucket_count);
        for entry in self.authors {
            for doc_id in entry.postings {
                authors.insert(&entry.key, doc_id);
            }
        }
        (words, authors)
    }
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    write_file(path, |sink| {
        serde_json::to_writer(&mut *sink, snapshot).map_err(io::Error::from)
    })
}

/// Load a snapshot file. A missing file is `Ok(None)`.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    let Some(reader) = open_if_exists(path)? else {
        return Ok(None);
    };
    let snapshot: Snapshot = serde_json::from_reader(reader).map_err(|e| Error::json(path, e))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::Config(format!(
            "{} has snapshot version {}, expected {}",
            path.display(),
            snapshot.version,
            SNAPSHOT_VERSION
        )));
    }
    Ok(Some(snapshot))
}
