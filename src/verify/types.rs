// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whole-structure invariant checks.
//!
//! | Check                 | Structure      | What's guaranteed                     |
//! |-----------------------|----------------|---------------------------------------|
//! | `check_tree`          | `IndexTree`    | AVL balance, stored heights, BST order |
//! | `check_author_index`  | `AuthorIndex`  | Bucket placement, no duplicate keys   |

use std::fmt;

use crate::authors::AuthorIndex;
use crate::tree::{IndexTree, Node};

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Subtree heights differ by more than one.
    Unbalanced { key: String, left: i32, right: i32 },
    /// Stored height disagrees with the children.
    StaleHeight {
        key: String,
        stored: i32,
        actual: i32,
    },
    /// In-order traversal is not strictly ascending.
    OutOfOrder { previous: String, next: String },
    /// The unique-key counter drifted from the node count.
    KeyCountMismatch { claimed: usize, actual: usize },
    /// An author entry sits in a bucket its hash doesn't map to.
    MisplacedAuthor {
        author: String,
        bucket: usize,
        expected: usize,
    },
    /// The same author appears twice.
    DuplicateAuthor { author: String },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::Unbalanced { key, left, right } => {
                write!(
                    f,
                    "node '{}' unbalanced: left height {} vs right height {}",
                    key, left, right
                )
            }
            InvariantError::StaleHeight {
                key,
                stored,
                actual,
            } => {
                write!(
                    f,
                    "node '{}' stores height {} but its subtree has height {}",
                    key, stored, actual
                )
            }
            InvariantError::OutOfOrder { previous, next } => {
                write!(f, "keys out of order: '{}' before '{}'", previous, next)
            }
            InvariantError::KeyCountMismatch { claimed, actual } => {
                write!(f, "unique key count {} but {} nodes", claimed, actual)
            }
            InvariantError::MisplacedAuthor {
                author,
                bucket,
                expected,
            } => {
                write!(
                    f,
                    "author '{}' in bucket {} but hashes to {}",
                    author, bucket, expected
                )
            }
            InvariantError::DuplicateAuthor { author } => {
                write!(f, "author '{}' stored more than once", author)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Verify balance, heights, ordering and the key counter of a tree.
pub fn check_tree(tree: &IndexTree) -> Result<(), InvariantError> {
    let mut nodes = 0;
    check_subtree(tree.root().as_deref(), &mut nodes)?;

    let mut previous: Option<&str> = None;
    for node in tree.iter() {
        if let Some(prev) = previous {
            if prev >= node.key() {
                return Err(InvariantError::OutOfOrder {
                    previous: prev.to_string(),
                    next: node.key().to_string(),
                });
            }
        }
        previous = Some(node.key());
    }

    if nodes != tree.unique_key_count() {
        return Err(InvariantError::KeyCountMismatch {
            claimed: tree.unique_key_count(),
            actual: nodes,
        });
    }
    Ok(())
}

/// Returns the real height of `node`, checking every descendant on the way.
fn check_subtree(node: Option<&Node>, count: &mut usize) -> Result<i32, InvariantError> {
    let Some(node) = node else {
        return Ok(-1);
    };
    *count += 1;

    let left = check_subtree(node.left.as_deref(), count)?;
    let right = check_subtree(node.right.as_deref(), count)?;
    if (left - right).abs() > 1 {
        return Err(InvariantError::Unbalanced {
            key: node.key.clone(),
            left,
            right,
        });
    }

    let actual = left.max(right) + 1;
    if node.height != actual {
        return Err(InvariantError::StaleHeight {
            key: node.key.clone(),
            stored: node.height,
            actual,
        });
    }
    Ok(actual)
}

/// Verify every author sits in its hash bucket and appears once.
pub fn check_author_index(index: &AuthorIndex) -> Result<(), InvariantError> {
    let mut seen = std::collections::HashSet::new();
    for (bucket, entries) in index.buckets().iter().enumerate() {
        for entry in entries {
            let expected = index.bucket_of(&entry.author);
            if expected != bucket {
                return Err(InvariantError::MisplacedAuthor {
                    author: entry.author.clone(),
                    bucket,
                    expected,
                });
            }
            if !seen.insert(entry.author.as_str()) {
                return Err(InvariantError::DuplicateAuthor {
                    author: entry.author.clone(),
                });
            }
        }
    }
    Ok(())
}
