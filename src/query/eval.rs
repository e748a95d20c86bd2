// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation against the word and author indexes.
//!
//! Intermediate results are sorted, deduplicated id lists, so every set
//! operation is a single merge pass.

use std::cmp::Ordering;

use crate::authors::AuthorIndex;
use crate::text::Normalizer;
use crate::tree::IndexTree;
use crate::types::DocId;

use super::parser::QueryExpr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Matching document ids, ascending.
    pub matches: Vec<DocId>,
    /// Query terms (as typed) with no postings in the word index.
    pub missing_terms: Vec<String>,
    /// The author filter, when the author index has no entry for it.
    pub missing_author: Option<String>,
}

/// Read-only view of the indexes a query runs against.
pub struct Evaluator<'a> {
    words: &'a IndexTree,
    authors: &'a AuthorIndex,
    normalizer: &'a Normalizer,
}

impl<'a> Evaluator<'a> {
    pub fn new(words: &'a IndexTree, authors: &'a AuthorIndex, normalizer: &'a Normalizer) -> Self {
        Self {
            words,
            authors,
            normalizer,
        }
    }

    pub fn evaluate(&self, expr: &QueryExpr) -> Evaluation {
        let mut evaluation = Evaluation::default();
        let matches = self.eval(expr, &mut evaluation);
        evaluation.matches = matches;
        tracing::debug!(query = %expr, matches = evaluation.matches.len(), "evaluated query");
        evaluation
    }

    fn eval(&self, expr: &QueryExpr, evaluation: &mut Evaluation) -> Vec<DocId> {
        match expr {
            QueryExpr::Term(term) => self.term_postings(term, evaluation),
            QueryExpr::And(terms) => {
                let mut lists = terms.iter().map(|t| self.term_postings(t, evaluation));
                let first = lists.next().unwrap_or_default();
                // Collect the rest so every missing term gets reported.
                let rest: Vec<Vec<DocId>> = lists.collect();
                rest.iter().fold(first, |acc, list| intersect(&acc, list))
            }
            QueryExpr::Or(terms) => terms
                .iter()
                .map(|t| self.term_postings(t, evaluation))
                .fold(Vec::new(), |acc, list| union(&acc, &list)),
            QueryExpr::Not { base, term } => {
                let base = self.eval(base, evaluation);
                let excluded = self.term_postings(term, evaluation);
                difference(&base, &excluded)
            }
            QueryExpr::AuthorFilter { base, surname } => {
                let base = self.eval(base, evaluation);
                match self.authors.lookup(surname) {
                    Some(ids) if !ids.is_empty() => intersect(&base, &sorted_set(ids)),
                    Some(_) => base,
                    None => {
                        evaluation.missing_author = Some(surname.clone());
                        base
                    }
                }
            }
        }
    }

    fn term_postings(&self, term: &str, evaluation: &mut Evaluation) -> Vec<DocId> {
        let key = self.normalizer.normalize_term(term);
        match self.words.postings(&key) {
            Some(ids) if !key.is_empty() => sorted_set(ids),
            _ => {
                tracing::info!(term, key = %key, "term not found in word index");
                if !evaluation.missing_terms.iter().any(|t| t == term) {
                    evaluation.missing_terms.push(term.to_string());
                }
                Vec::new()
            }
        }
    }
}

fn sorted_set(ids: &[DocId]) -> Vec<DocId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Both inputs sorted and deduplicated.
pub(crate) fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

pub(crate) fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

pub(crate) fn difference(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;
    for id in a {
        while j < b.len() && b[j] < *id {
            j += 1;
        }
        if j < b.len() && b[j] == *id {
            continue;
        }
        out.push(id.clone());
    }
    out
}
