// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The stop-word set: a key-only `IndexTree` used for membership tests.
//!
//! Each word is stored twice when cleaning changes it (`"don't"` and
//! `"dont"`), so the set answers both for raw body tokens at ranking time and
//! for cleaned tokens at indexing time.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tree::IndexTree;

use super::normalize::clean;

/// English list shipped with the crate, one word per line.
const BUILTIN: &str = include_str!("../../data/stop_words.txt");

#[derive(Debug, Default)]
pub struct StopWords {
    tree: IndexTree,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded English list.
    pub fn builtin() -> Self {
        Self::from_lines(BUILTIN)
    }

    /// One word per line. Blank lines and surrounding whitespace are ignored.
    pub fn from_lines(text: &str) -> Self {
        let mut words = Self::empty();
        for line in text.lines() {
            words.insert(line);
        }
        words
    }

    /// Read a stop-word file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let words = Self::from_lines(&text);
        tracing::debug!(path = %path.display(), words = words.len(), "loaded stop words");
        Ok(words)
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.tree.insert_key(word);
        let cleaned = clean(word);
        if !cleaned.is_empty() && cleaned != word {
            self.tree.insert_key(&cleaned);
        }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.tree.contains(word)
    }

    /// Distinct stored forms, raw and cleaned.
    pub fn len(&self) -> usize {
        self.tree.unique_key_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
