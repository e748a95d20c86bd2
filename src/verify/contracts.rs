// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-only runtime contracts.
//!
//! Checks here stay cheap enough for the insert and search paths. The full
//! walks live in `verify::check_tree` and `verify::check_author_index`.

use crate::tree::IndexTree;
use crate::types::RankedResult;

/// The root of the tree must be balanced after every insert.
#[inline]
pub fn check_tree_balanced(tree: &IndexTree) {
    if let Some(root) = tree.root() {
        let left = crate::tree::height_of(&root.left);
        let right = crate::tree::height_of(&root.right);
        debug_assert!(
            (left - right).abs() <= 1,
            "Contract violation: root '{}' unbalanced ({} vs {})",
            root.key(),
            left,
            right
        );
    }
}

/// Ranked output must be bounded, non-negative and sorted descending.
#[inline]
pub fn check_ranked_results(results: &[RankedResult], candidates: usize, limit: usize) {
    debug_assert!(
        results.len() <= limit.min(candidates),
        "Contract violation: {} results for {} candidates (limit {})",
        results.len(),
        candidates,
        limit
    );
    debug_assert!(
        results.iter().all(|r| r.score >= 0.0),
        "Contract violation: negative score"
    );
    debug_assert!(
        results.windows(2).all(|w| w[0].score >= w[1].score),
        "Contract violation: results not sorted by descending score"
    );
}
