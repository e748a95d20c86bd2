// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! AVL node storage and the rotations that keep it balanced.
//!
//! Child slots are `Option<Box<Node>>`. Every mutating function takes a subtree
//! by value and hands back the (possibly new) subtree root, and the caller
//! rebinds its slot. No node is ever reachable from two places at once.
//!
//! Heights follow the textbook convention: an empty subtree is -1, a leaf is 0.

use std::cmp::Ordering;

use crate::types::DocId;

pub(crate) type Link = Option<Box<Node>>;

/// What an insert carries into the tree.
#[derive(Debug)]
pub(crate) enum Payload {
    /// Word index insert: append the id, bump the counter.
    Posting(DocId),
    /// Stop-word insert: the key alone. Repeats are ignored.
    KeyOnly,
}

/// Whether an insert created a node or landed on an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    NewKey,
    Existing,
}

/// One index key with its postings. Exposed read-only through `IndexTree::iter`.
#[derive(Debug)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) postings: Vec<DocId>,
    pub(crate) count: usize,
    pub(crate) height: i32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    fn leaf(key: &str, payload: Payload) -> Self {
        let postings = match payload {
            Payload::Posting(doc_id) => vec![doc_id],
            Payload::KeyOnly => Vec::new(),
        };
        Node {
            key: key.to_string(),
            postings,
            count: 1,
            height: 0,
            left: None,
            right: None,
        }
    }

    fn absorb(&mut self, payload: Payload) {
        if let Payload::Posting(doc_id) = payload {
            self.postings.push(doc_id);
            self.count += 1;
        }
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }
}

#[inline]
pub(crate) fn height(link: &Link) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Insert `key` below `link`, returning the new subtree root.
///
/// Rebalances on the way back up. The rotation case is picked by comparing the
/// new key with the heavy child's key, exactly as in the classic recursive AVL
/// insert: outside insertions get a single rotation, inside ones a double.
pub(crate) fn insert(link: Link, key: &str, payload: Payload, outcome: &mut Inserted) -> Box<Node> {
    let mut node = match link {
        None => {
            *outcome = Inserted::NewKey;
            return Box::new(Node::leaf(key, payload));
        }
        Some(node) => node,
    };

    match key.cmp(node.key.as_str()) {
        Ordering::Less => {
            node.left = Some(insert(node.left.take(), key, payload, outcome));
            if height(&node.left) - height(&node.right) == 2 {
                let outside = node
                    .left
                    .as_ref()
                    .is_some_and(|left| key < left.key.as_str());
                node = if outside {
                    rotate_with_left_child(node)
                } else {
                    double_with_left_child(node)
                };
            }
        }
        Ordering::Greater => {
            node.right = Some(insert(node.right.take(), key, payload, outcome));
            if height(&node.right) - height(&node.left) == 2 {
                let outside = node
                    .right
                    .as_ref()
                    .is_some_and(|right| key > right.key.as_str());
                node = if outside {
                    rotate_with_right_child(node)
                } else {
                    double_with_right_child(node)
                };
            }
        }
        Ordering::Equal => {
            *outcome = Inserted::Existing;
            node.absorb(payload);
            return node;
        }
    }

    node.update_height();
    node
}

/// LL case: the left child becomes the subtree root.
pub(crate) fn rotate_with_left_child(mut k2: Box<Node>) -> Box<Node> {
    let Some(mut k1) = k2.left.take() else {
        return k2;
    };
    k2.left = k1.right.take();
    k2.update_height();
    k1.right = Some(k2);
    k1.update_height();
    tracing::trace!(root = %k1.key, "rotate right");
    k1
}

/// RR case: the right child becomes the subtree root.
pub(crate) fn rotate_with_right_child(mut k2: Box<Node>) -> Box<Node> {
    let Some(mut k1) = k2.right.take() else {
        return k2;
    };
    k2.right = k1.left.take();
    k2.update_height();
    k1.left = Some(k2);
    k1.update_height();
    tracing::trace!(root = %k1.key, "rotate left");
    k1
}

/// LR case: straighten the left child, then rotate right.
pub(crate) fn double_with_left_child(mut k3: Box<Node>) -> Box<Node> {
    if let Some(left) = k3.left.take() {
        k3.left = Some(rotate_with_right_child(left));
    }
    rotate_with_left_child(k3)
}

/// RL case: straighten the right child, then rotate left.
pub(crate) fn double_with_right_child(mut k3: Box<Node>) -> Box<Node> {
    if let Some(right) = k3.right.take() {
        k3.right = Some(rotate_with_left_child(right));
    }
    rotate_with_right_child(k3)
}

/// Iterative lookup. The tree is balanced, but there is no reason to recurse.
pub(crate) fn find<'a>(mut link: &'a Link, key: &str) -> Option<&'a Node> {
    while let Some(node) = link {
        match key.cmp(node.key.as_str()) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(node),
        }
    }
    None
}
