// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine context.
//!
//! `SearchEngine` owns every structure a session touches: the word index,
//! the author index, the stop-word set, the loaded documents and the
//! indexing counters. Nothing is global; callers pass the engine around.
//!
//! ```text
//! Document ──index_document──▶ word index (AVL)  ──┐
//!                           └▶ author index (hash) ─┼─ search ─▶ evaluate ─▶ rank ─▶ SearchResponse
//!                                                   │
//!                        save/restore ◀─────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::authors::AuthorIndex;
use crate::build::{ArticleMeta, MetadataTable};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::persist::{self, PersistFormat, Snapshot};
use crate::query::{parse, Evaluator, QueryExpr, QueryWarning};
use crate::ranking::Ranker;
use crate::text::{Normalizer, StopWords};
use crate::tree::IndexTree;
use crate::types::{DocId, Document, RankedResult};

/// Everything one query produced.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub expr: QueryExpr,
    pub warnings: Vec<QueryWarning>,
    /// Number of documents that matched before ranking cut the list.
    pub candidates: usize,
    pub missing_terms: Vec<String>,
    pub missing_author: Option<String>,
    pub results: Vec<RankedResult>,
}

/// What `restore` found on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Word index keys restored, `None` if its file was missing.
    pub words: Option<usize>,
    /// Author index keys restored, `None` if its file was missing.
    pub authors: Option<usize>,
    pub missing: Vec<PathBuf>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub articles: usize,
    /// Distinct terms per document, summed over documents.
    pub words_indexed: usize,
    pub unique_words: usize,
    pub unique_authors: usize,
    /// `words_indexed / articles`, integer division, 0 with no articles.
    pub avg_words_per_article: usize,
    /// Stop words dropped per article, same rounding.
    pub avg_stop_words_per_article: usize,
    pub top_words: Vec<WordCount>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    articles: usize,
    words_indexed: usize,
    stop_words: usize,
}

#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    words: IndexTree,
    authors: AuthorIndex,
    stop_words: StopWords,
    normalizer: Normalizer,
    documents: HashMap<DocId, Document>,
    metadata: MetadataTable,
    counters: Counters,
}

impl SearchEngine {
    pub fn new(config: EngineConfig, stop_words: StopWords) -> Self {
        let authors = AuthorIndex::new(config.bucket_count);
        Self {
            config,
            words: IndexTree::new(),
            authors,
            stop_words,
            normalizer: Normalizer::new(),
            documents: HashMap::new(),
            metadata: MetadataTable::new(),
            counters: Counters::default(),
        }
    }

    /// Engine with the stop words named in `config`, or the built-in list.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let stop_words = match &config.stop_words {
            Some(path) => StopWords::load(path)?,
            None => StopWords::builtin(),
        };
        Ok(Self::new(config, stop_words))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn word_index(&self) -> &IndexTree {
        &self.words
    }

    pub fn author_index(&self) -> &AuthorIndex {
        &self.authors
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Add one document to both indexes.
    ///
    /// Returns `false` and leaves the indexes alone if a document with the
    /// same id is already indexed.
    pub fn index_document(&mut self, document: Document) -> bool {
        if self.documents.contains_key(&document.id) {
            tracing::warn!(id = %document.id, "document already indexed, skipping");
            return false;
        }

        let analysis = self.normalizer.analyze(&document.body_text, &self.stop_words);
        for term in &analysis.terms {
            self.words.insert(term, document.id.clone());
        }
        for surname in document.authors_surnames.iter().filter(|s| !s.is_empty()) {
            self.authors.insert(surname, document.id.clone());
        }

        self.counters.articles += 1;
        self.counters.words_indexed += analysis.terms.len();
        self.counters.stop_words += analysis.stop_words;

        tracing::trace!(id = %document.id, terms = analysis.terms.len(), "indexed document");
        self.documents.insert(document.id.clone(), document);
        true
    }

    /// Index a batch. Returns how many were new.
    pub fn index_corpus<I>(&mut self, documents: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let indexed = documents
            .into_iter()
            .map(|doc| self.index_document(doc))
            .filter(|&new| new)
            .count();
        tracing::info!(
            indexed,
            unique_words = self.words.unique_key_count(),
            unique_authors = self.authors.unique_key_count(),
            "indexed corpus"
        );
        indexed
    }

    /// Make documents available for ranking and display without indexing
    /// them. Used together with `restore`.
    pub fn attach_documents<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = Document>,
    {
        for doc in documents {
            self.documents.insert(doc.id.clone(), doc);
        }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Publish date and journal for display. Replaces any earlier table.
    pub fn attach_metadata(&mut self, metadata: MetadataTable) {
        self.metadata = metadata;
    }

    pub fn metadata(&self, id: &str) -> Option<&ArticleMeta> {
        self.metadata.get(id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Parse, evaluate and rank one query.
    pub fn search(&self, query: &str) -> Result<SearchResponse> {
        let parsed = parse(query)?;
        for warning in &parsed.warnings {
            tracing::debug!(%warning, "query warning");
        }

        let evaluation =
            Evaluator::new(&self.words, &self.authors, &self.normalizer).evaluate(&parsed.expr);
        let terms = parsed.expr.positive_terms();
        let results = Ranker::new(&self.stop_words, &self.normalizer, self.config.term_matching)
            .rank(&evaluation.matches, &terms, &self.documents, self.config.top_k);

        Ok(SearchResponse {
            candidates: evaluation.matches.len(),
            missing_terms: evaluation.missing_terms,
            missing_author: evaluation.missing_author,
            results,
            expr: parsed.expr,
            warnings: parsed.warnings,
        })
    }

    /// Drop both indexes, the documents, their metadata and the counters.
    /// Stop words stay.
    pub fn clear(&mut self) {
        self.words.clear();
        self.authors.clear();
        self.documents.clear();
        self.metadata.clear();
        self.counters = Counters::default();
    }

    /// Write the indexes under `dir`.
    pub fn save(&self, dir: &Path, format: PersistFormat) -> Result<()> {
        match format {
            PersistFormat::Lines => {
                persist::save_word_index(&self.words, &dir.join(&self.config.word_index_file))?;
                persist::save_author_index(&self.authors, &dir.join(&self.config.author_index_file))?;
            }
            PersistFormat::Json => {
                let snapshot = Snapshot::capture(&self.words, &self.authors);
                persist::save_snapshot(&snapshot, &dir.join(&self.config.snapshot_file))?;
            }
        }
        tracing::info!(dir = %dir.display(), ?format, "saved indexes");
        Ok(())
    }

    /// Load the indexes saved under `dir`.
    ///
    /// Each index found on disk replaces the in-memory one. A missing file
    /// leaves its index untouched and is listed in the report. Nothing is
    /// replaced unless every file present reads cleanly.
    pub fn restore(&mut self, dir: &Path, format: PersistFormat) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();
        let (words, authors) = match format {
            PersistFormat::Lines => {
                let words_path = dir.join(&self.config.word_index_file);
                let authors_path = dir.join(&self.config.author_index_file);
                let words = persist::load_word_index(&words_path, self.config.doc_id_len)?;
                let authors = persist::load_author_index(
                    &authors_path,
                    self.config.doc_id_len,
                    self.config.bucket_count,
                )?;
                if words.is_none() {
                    report.missing.push(words_path);
                }
                if authors.is_none() {
                    report.missing.push(authors_path);
                }
                (words, authors)
            }
            PersistFormat::Json => {
                let path = dir.join(&self.config.snapshot_file);
                match persist::load_snapshot(&path)? {
                    Some(snapshot) => {
                        let (words, authors) = snapshot.restore(self.config.bucket_count);
                        (Some(words), Some(authors))
                    }
                    None => {
                        report.missing.push(path);
                        (None, None)
                    }
                }
            }
        };

        if let Some(words) = words {
            report.words = Some(words.unique_key_count());
            self.words = words;
        }
        if let Some(authors) = authors {
            report.authors = Some(authors.unique_key_count());
            self.authors = authors;
        }
        tracing::info!(
            dir = %dir.display(),
            words = ?report.words,
            authors = ?report.authors,
            "restored indexes"
        );
        Ok(report)
    }

    pub fn statistics(&self) -> Statistics {
        let Counters {
            articles,
            words_indexed,
            stop_words,
        } = self.counters;
        let per_article = |total: usize| total.checked_div(articles).unwrap_or(0);

        Statistics {
            articles,
            words_indexed,
            unique_words: self.words.unique_key_count(),
            unique_authors: self.authors.unique_key_count(),
            avg_words_per_article: per_article(words_indexed),
            avg_stop_words_per_article: per_article(stop_words),
            top_words: self
                .words
                .entries_by_frequency(self.config.top_words)
                .into_iter()
                .map(|e| WordCount {
                    word: e.key,
                    count: e.occurrence_count,
                })
                .collect(),
        }
    }
}
