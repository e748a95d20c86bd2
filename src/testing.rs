// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::authors::AuthorIndex;
use crate::persist::DEFAULT_DOC_ID_LEN;
use crate::tree::IndexTree;
use crate::types::{DocId, Document};

/// A CORD-19 shaped id: `n` as 40 lowercase hex digits.
pub fn doc_id(n: usize) -> DocId {
    DocId::new(format!("{:0width$x}", n, width = DEFAULT_DOC_ID_LEN))
}

/// A document with one author per surname.
pub fn make_doc(id: DocId, surnames: &[&str], body: &str) -> Document {
    Document {
        title: format!("Article {}", id),
        authors: surnames.iter().map(|s| format!("J. {}", s)).collect(),
        authors_surnames: surnames.iter().map(|s| s.to_string()).collect(),
        body_text: body.to_string(),
        id,
    }
}

/// The four-document example used throughout the query tests:
///
/// ```text
/// cell  -> d1 d2 d3
/// virus -> d2 d3
/// Liu   -> d1 d4
/// ```
pub fn example_indexes() -> (IndexTree, AuthorIndex) {
    let mut words = IndexTree::new();
    for n in 1..=3 {
        words.insert("cell", doc_id(n));
    }
    for n in 2..=3 {
        words.insert("virus", doc_id(n));
    }
    let mut authors = AuthorIndex::new(101);
    authors.insert("Liu", doc_id(1));
    authors.insert("Liu", doc_id(4));
    (words, authors)
}
