// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the engine.
//!
//! Documents come in from the corpus loader, document ids flow through every
//! postings list, and ranked results come out the other end. Everything here is
//! plain data; the structures that own it live in `tree`, `authors` and `engine`.
//!
//! # Invariants
//!
//! - **IndexEntry**: `occurrence_count >= 1` for word entries, and
//!   `postings.len() == occurrence_count` when the entry was built by
//!   `IndexTree::insert`. Key-only (stop-word) entries have empty postings.
//!
//! - **DocId**: opaque. The persistence codec relies on every id having the
//!   same length (40 hex chars in CORD-19), but nothing here enforces it.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Document identifier, e.g. a CORD-19 `paper_id` (40 hex characters).
///
/// A newtype rather than a bare `String` so postings lists, author lists and
/// ranked results can't be mixed up with words or surnames.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, which is what the persistence format keys on.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        DocId(id.to_string())
    }
}

impl From<String> for DocId {
    fn from(id: String) -> Self {
        DocId(id)
    }
}

impl Borrow<str> for DocId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One key of an index with everything stored under it.
///
/// Returned by traversal APIs as an owned snapshot, so callers can sort or
/// filter without holding a borrow on the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: String,
    /// Insertion order, one id per occurrence. Duplicates are allowed.
    pub postings: Vec<DocId>,
    pub occurrence_count: usize,
}

/// Words shown when an article is opened from a result list.
pub const PREVIEW_WORDS: usize = 300;

/// A research article as the engine sees it.
///
/// The engine reads `id`, `authors_surnames` and `body_text`. `title` and
/// `authors` are carried along for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub authors: Vec<String>,
    pub authors_surnames: Vec<String>,
    pub body_text: String,
}

impl Document {
    /// The first `words` whitespace-separated words of the body.
    pub fn preview(&self, words: usize) -> String {
        self.body_text
            .split_whitespace()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub document_id: DocId,
    /// Sum of per-term frequencies. Always `>= 0`.
    pub score: f64,
}
