// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Height-balanced index tree: the word index, and the stop-word set.
//!
//! An AVL tree keyed by `String`. Each node owns a postings list and an
//! occurrence counter. Two insert flavors share one structure:
//!
//! - `insert(key, doc_id)` for the word index. Re-inserting a key appends the
//!   id and bumps the counter; it never creates a second node.
//! - `insert_key(key)` for the stop-word set. Key only, repeats ignored.
//!
//! Nodes are never deleted one at a time. `clear()` drops the whole tree.
//!
//! # Invariants
//!
//! 1. **BALANCED**: `|height(left) - height(right)| <= 1` at every node
//! 2. **ORDERED**: in-order traversal is strictly ascending
//! 3. **COUNTED**: `unique_key_count()` equals the number of nodes
//!
//! `crate::verify::check_tree` checks all three.

mod node;

use std::io::{self, Write};

use crate::persist::write_entry;
use crate::types::{DocId, IndexEntry};

pub use node::Node;
pub(crate) use node::height as height_of;
use node::{Inserted, Link, Payload};

#[derive(Debug, Default)]
pub struct IndexTree {
    root: Link,
    unique_keys: usize,
}

impl IndexTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key` in `doc_id`.
    pub fn insert(&mut self, key: &str, doc_id: DocId) {
        self.insert_payload(key, Payload::Posting(doc_id));
    }

    /// Add a bare key (stop-word variant). Returns `true` if the key was new.
    pub fn insert_key(&mut self, key: &str) -> bool {
        self.insert_payload(key, Payload::KeyOnly) == Inserted::NewKey
    }

    fn insert_payload(&mut self, key: &str, payload: Payload) -> Inserted {
        let mut outcome = Inserted::Existing;
        self.root = Some(node::insert(self.root.take(), key, payload, &mut outcome));
        if outcome == Inserted::NewKey {
            self.unique_keys += 1;
        }
        crate::verify::contracts::check_tree_balanced(self);
        outcome
    }

    pub fn contains(&self, key: &str) -> bool {
        node::find(&self.root, key).is_some()
    }

    /// Postings for `key`, or `None` when the key was never inserted.
    ///
    /// `Some(&[])` is possible for key-only entries, so callers that need to
    /// tell "unknown" from "known but empty" should use this.
    pub fn postings(&self, key: &str) -> Option<&[DocId]> {
        node::find(&self.root, key).map(|n| n.postings.as_slice())
    }

    /// Postings for `key`; an unknown key yields an empty slice.
    pub fn lookup_postings(&self, key: &str) -> &[DocId] {
        self.postings(key).unwrap_or(&[])
    }

    pub fn occurrence_count(&self, key: &str) -> Option<usize> {
        node::find(&self.root, key).map(|n| n.count)
    }

    pub fn unique_key_count(&self) -> usize {
        self.unique_keys
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree (-1 when empty).
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// Borrowing in-order iterator.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// Owned snapshot of every entry, ascending by key.
    pub fn in_order_entries(&self) -> Vec<IndexEntry> {
        self.iter()
            .map(|n| IndexEntry {
                key: n.key.clone(),
                postings: n.postings.clone(),
                occurrence_count: n.count,
            })
            .collect()
    }

    /// The `limit` most frequent keys, highest count first.
    ///
    /// Equal counts fall back to ascending key, so the report is stable
    /// between runs.
    pub fn entries_by_frequency(&self, limit: usize) -> Vec<IndexEntry> {
        let mut nodes: Vec<&Node> = self.iter().collect();
        nodes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        nodes
            .into_iter()
            .take(limit)
            .map(|n| IndexEntry {
                key: n.key.clone(),
                postings: n.postings.clone(),
                occurrence_count: n.count,
            })
            .collect()
    }

    /// Drop every node and reset the counters.
    pub fn clear(&mut self) {
        self.root = None;
        self.unique_keys = 0;
    }

    /// Write the tree in the line format of `crate::persist`.
    ///
    /// Ascending key order. Empty keys and keys without postings are skipped,
    /// since a reader could never attach ids to them.
    pub fn serialize<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for node in self.iter() {
            if node.key.is_empty() || node.postings.is_empty() {
                continue;
            }
            write_entry(sink, &node.key, &node.postings)?;
        }
        Ok(())
    }

    /// Full walk of the balance, order and count invariants.
    pub fn check_invariants(&self) -> Result<(), crate::verify::InvariantError> {
        crate::verify::check_tree(self)
    }

    pub(crate) fn root(&self) -> &Link {
        &self.root
    }
}

/// In-order traversal with an explicit stack.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some(node)
    }
}

impl Node {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn postings(&self) -> &[DocId] {
        &self.postings
    }

    pub fn occurrence_count(&self) -> usize {
        self.count
    }
}
