// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CORD-19 `metadata.csv`: publish date and journal per paper.
//!
//! Only three columns matter:
//!
//! ```text
//! cord_uid, sha, source_x, title, ..., publish_time, authors, journal, ...
//!           ^^^                        ^^^^^^^^^^^^           ^^^^^^^
//!           paper ids (";"-separated)  published              publication
//! ```
//!
//! Columns are found by header name. Files whose header lacks a name fall
//! back to the CORD-19 positions (1, 9, 11).

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocId;

const SHA_COLUMN: (&str, usize) = ("sha", 1);
const PUBLISHED_COLUMN: (&str, usize) = ("publish_time", 9);
const PUBLICATION_COLUMN: (&str, usize) = ("journal", 11);

/// Display-only facts about a paper that its JSON file doesn't carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleMeta {
    pub published: Option<String>,
    pub publication: Option<String>,
}

pub type MetadataTable = HashMap<DocId, ArticleMeta>;

fn column(headers: &csv::StringRecord, (name, fallback): (&str, usize)) -> usize {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .unwrap_or(fallback)
}

fn field(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse metadata rows from any reader. The first row is the header.
///
/// A row listing several paper ids applies to each of them; a later row for
/// the same id replaces an earlier one. Malformed rows are skipped.
pub fn read_metadata<R: Read>(source: R) -> csv::Result<MetadataTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let sha = column(&headers, SHA_COLUMN);
    let published = column(&headers, PUBLISHED_COLUMN);
    let publication = column(&headers, PUBLICATION_COLUMN);

    let mut table = MetadataTable::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "malformed metadata row, skipped");
                continue;
            }
        };
        let Some(ids) = record.get(sha) else {
            continue;
        };
        let meta = ArticleMeta {
            published: field(&record, published),
            publication: field(&record, publication),
        };
        for id in ids.split(';').map(str::trim).filter(|id| !id.is_empty()) {
            table.insert(DocId::from(id), meta.clone());
        }
    }
    Ok(table)
}

/// Load a metadata CSV file.
pub fn load_metadata(path: &Path) -> Result<MetadataTable> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let table = read_metadata(file).map_err(|e| Error::csv(path, e))?;
    tracing::info!(path = %path.display(), papers = table.len(), "loaded metadata");
    Ok(table)
}
