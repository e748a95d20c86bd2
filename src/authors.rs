// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Author index: surname → postings, in a fixed-size hash table.
//!
//! Separate chaining with small `Vec` buckets and a linear scan inside each
//! bucket. The bucket count is set once at construction and never changes;
//! with the default prime (98317) and ~30k CORD-19 surnames, chains stay short.
//! Adversarial keys can still pile into one bucket. That is accepted.
//!
//! The bucket hash is CRC-32 over the key bytes rather than `std`'s
//! randomized `SipHash`, so serialization order is identical on every run.

use std::io::{self, Write};

use crate::persist::write_entry;
use crate::types::{DocId, IndexEntry};

/// Bucket count used when nothing else is configured. Prime.
pub const DEFAULT_BUCKET_COUNT: usize = 98_317;

/// One chain element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
    pub author: String,
    pub postings: Vec<DocId>,
}

#[derive(Debug, Clone)]
pub struct AuthorIndex {
    buckets: Vec<Vec<AuthorEntry>>,
    unique_authors: usize,
}

impl Default for AuthorIndex {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

impl AuthorIndex {
    /// A table with `bucket_count` buckets. Zero is bumped to one.
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count.max(1)],
            unique_authors: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// `hash(key) mod bucket_count`.
    pub fn bucket_of(&self, author: &str) -> usize {
        crc32fast::hash(author.as_bytes()) as usize % self.buckets.len()
    }

    /// Append `doc_id` to `author`'s postings, creating the entry if needed.
    pub fn insert(&mut self, author: &str, doc_id: DocId) {
        let idx = self.bucket_of(author);
        let bucket = &mut self.buckets[idx];
        if let Some(entry) = bucket.iter_mut().find(|e| e.author == author) {
            entry.postings.push(doc_id);
            return;
        }
        bucket.push(AuthorEntry {
            author: author.to_string(),
            postings: vec![doc_id],
        });
        self.unique_authors += 1;
    }

    /// Postings for `author`, or `None` if the author is unknown.
    pub fn lookup(&self, author: &str) -> Option<&[DocId]> {
        let found = self.buckets[self.bucket_of(author)]
            .iter()
            .find(|e| e.author == author)
            .map(|e| e.postings.as_slice());
        if found.is_none() {
            tracing::info!(author, "author not found");
        }
        found
    }

    /// Delete `author`. Returns the removed entry; a miss is a logged no-op.
    pub fn remove(&mut self, author: &str) -> Option<AuthorEntry> {
        let idx = self.bucket_of(author);
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|e| e.author == author) {
            Some(pos) => {
                self.unique_authors -= 1;
                Some(bucket.remove(pos))
            }
            None => {
                tracing::info!(author, "author key not found, nothing removed");
                None
            }
        }
    }

    pub fn unique_key_count(&self) -> usize {
        self.unique_authors
    }

    pub fn is_empty(&self) -> bool {
        self.unique_authors == 0
    }

    /// Empty every bucket. The bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
            bucket.shrink_to_fit();
        }
        self.unique_authors = 0;
    }

    /// Entries in bucket-then-chain order.
    pub fn iter(&self) -> impl Iterator<Item = &AuthorEntry> + '_ {
        self.buckets.iter().flatten()
    }

    /// Owned snapshot in bucket-then-chain order, for callers that want
    /// the same shape as `IndexTree::in_order_entries`.
    pub fn entries(&self) -> Vec<IndexEntry> {
        self.iter()
            .map(|e| IndexEntry {
                key: e.author.clone(),
                postings: e.postings.clone(),
                occurrence_count: e.postings.len(),
            })
            .collect()
    }

    /// Write every entry in the line format of `crate::persist`.
    ///
    /// The order is only meaningful in that it is stable for a given bucket
    /// count.
    pub fn serialize<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for entry in self.iter() {
            write_entry(sink, &entry.author, &entry.postings)?;
        }
        Ok(())
    }

    /// Longest chain length. Handy for spotting clustering.
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn buckets(&self) -> &[Vec<AuthorEntry>] {
        &self.buckets
    }
}
