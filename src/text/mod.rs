// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: body text in, index terms out.
//!
//! The indexing pipeline, in order:
//!
//! ```text
//! body ─▶ clean ─▶ tokenize ─▶ drop stop words ─▶ stem ─▶ dedupe ─▶ terms
//!         (punct, digits,      (counted)          (Snowball
//!          case, accents)                          English)
//! ```
//!
//! Query terms take the same path minus the stop-word and dedupe steps, so a
//! query for `"Infections"` looks up `"infect"`.

mod normalize;
mod stop_words;

pub use normalize::{clean, tokenize};
pub use stop_words::StopWords;

use rust_stemmers::{Algorithm, Stemmer};

/// Result of running the indexing pipeline over one document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Distinct stemmed terms, sorted.
    pub terms: Vec<String>,
    /// Tokens dropped as stop words (with repeats).
    pub stop_words: usize,
    /// Tokens after cleaning, stop words included.
    pub tokens: usize,
}

pub struct Normalizer {
    stemmer: Stemmer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").field("stemmer", &"english").finish()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Index-time pipeline for one document body.
    pub fn analyze(&self, body: &str, stop_words: &StopWords) -> Analysis {
        let cleaned = clean(body);
        let mut analysis = Analysis::default();

        for token in tokenize(&cleaned) {
            analysis.tokens += 1;
            if stop_words.contains(token) {
                analysis.stop_words += 1;
                continue;
            }
            analysis.terms.push(self.stem(token));
        }

        analysis.terms.sort_unstable();
        analysis.terms.dedup();
        analysis
    }

    /// Every stemmed, non-stop-word token of `body`, repeats kept.
    ///
    /// The scoring counterpart of `analyze`, used when ranking in
    /// `TermMatching::Normalized` mode.
    pub fn stemmed_tokens(&self, body: &str, stop_words: &StopWords) -> Vec<String> {
        let cleaned = clean(body);
        tokenize(&cleaned)
            .filter(|t| !stop_words.contains(t))
            .map(|t| self.stem(t))
            .collect()
    }

    /// Query-time form of a single term. Empty if nothing survives cleaning.
    pub fn normalize_term(&self, term: &str) -> String {
        let cleaned = clean(term);
        let joined: String = tokenize(&cleaned).collect();
        if joined.is_empty() {
            return joined;
        }
        self.stem(&joined)
    }
}
