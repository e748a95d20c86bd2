// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: term frequency, summed over the query's positive terms.
//!
//! For a candidate document and a term:
//!
//! ```text
//! tf(term, doc) = occurrences of term in doc's tokens / number of tokens
//! ```
//!
//! where the tokens are the body split on whitespace with stop words removed.
//! A document's score is the sum of `tf` over every positive query term.
//!
//! Selection is a repeated linear scan over the remaining candidates, taking
//! the best each pass, so picking `k` results out of `n` is O(k·n). Ties go
//! to the smaller document id.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::{Normalizer, StopWords};
use crate::types::{DocId, Document, RankedResult};
use crate::verify::contracts;

/// Most results returned for one query.
pub const MAX_RESULTS: usize = 15;

/// How query terms are compared against body tokens when scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermMatching {
    /// Body split on whitespace as-is (case and punctuation kept), query term
    /// compared verbatim.
    #[default]
    Raw,
    /// Body and term both cleaned and stemmed, the same way the word index is
    /// built.
    Normalized,
}

impl std::str::FromStr for TermMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(TermMatching::Raw),
            "normalized" => Ok(TermMatching::Normalized),
            other => Err(format!("unknown term matching mode '{}'", other)),
        }
    }
}

/// Fraction of `tokens` equal to `term`. Zero for an empty token list.
pub fn term_frequency<T: AsRef<str>>(tokens: &[T], term: &str) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens.iter().filter(|t| t.as_ref() == term).count();
    hits as f64 / tokens.len() as f64
}

pub struct Ranker<'a> {
    stop_words: &'a StopWords,
    normalizer: &'a Normalizer,
    matching: TermMatching,
}

impl<'a> Ranker<'a> {
    pub fn new(stop_words: &'a StopWords, normalizer: &'a Normalizer, matching: TermMatching) -> Self {
        Self {
            stop_words,
            normalizer,
            matching,
        }
    }

    /// Summed term frequency of `terms` in `body`.
    pub fn score(&self, body: &str, terms: &[&str]) -> f64 {
        match self.matching {
            TermMatching::Raw => {
                let tokens: Vec<&str> = body
                    .split_whitespace()
                    .filter(|t| !self.stop_words.contains(t))
                    .collect();
                terms.iter().map(|term| term_frequency(&tokens, term)).sum()
            }
            TermMatching::Normalized => {
                let tokens = self.normalizer.stemmed_tokens(body, self.stop_words);
                terms
                    .iter()
                    .map(|term| term_frequency(&tokens, &self.normalizer.normalize_term(term)))
                    .sum()
            }
        }
    }

    /// Top `limit` candidates by score.
    ///
    /// Candidates missing from `documents` score 0 and stay eligible.
    pub fn rank(
        &self,
        candidates: &[DocId],
        terms: &[&str],
        documents: &HashMap<DocId, Document>,
        limit: usize,
    ) -> Vec<RankedResult> {
        let mut remaining: Vec<RankedResult> = candidates
            .iter()
            .map(|id| RankedResult {
                document_id: id.clone(),
                score: documents
                    .get(id)
                    .map_or(0.0, |doc| self.score(&doc.body_text, terms)),
            })
            .collect();

        let mut results = Vec::with_capacity(limit.min(remaining.len()));
        while results.len() < limit && !remaining.is_empty() {
            let mut best = 0;
            for i in 1..remaining.len() {
                if outranks(&remaining[i], &remaining[best]) {
                    best = i;
                }
            }
            results.push(remaining.swap_remove(best));
        }

        contracts::check_ranked_results(&results, candidates.len(), limit);
        results
    }
}

/// Higher score first, then smaller id.
fn outranks(a: &RankedResult, b: &RankedResult) -> bool {
    match a.score.total_cmp(&b.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => a.document_id < b.document_id,
    }
}
