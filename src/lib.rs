// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory boolean search over research-article corpora.
//!
//! Articles are indexed into two structures: an AVL tree mapping stemmed
//! words to the documents containing them, and a fixed-size hash table
//! mapping author surnames to their documents. Queries combine words with
//! `AND`/`OR`, exclude one with `NOT` and filter by `AUTHOR`; matches are
//! ranked by term frequency.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   build/     │────▶│   text/      │────▶│   tree/      │  word index
//! │ (CORD-19     │     │ (clean, stop │     │  (AVL)       │
//! │  loading)    │     │  words, stem)│     └──────────────┘
//! └──────────────┘     └──────────────┘     ┌──────────────┐
//!        │                                  │  authors.rs  │  author index
//!        │                                  │  (hash)      │
//!        ▼                                  └──────────────┘
//! ┌─────────────────────────────────────────────────────────┐
//! │ engine.rs  SearchEngine: index, search, save, restore   │
//! │   query/   lex ─▶ parse ─▶ evaluate                     │
//! │   ranking  term frequency, top-k                        │
//! │   persist  line format + JSON snapshot                  │
//! └─────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │ verify/    invariant checks (balance, order, buckets)   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use quarry::{build, EngineConfig, SearchEngine};
//! use std::path::Path;
//!
//! # fn main() -> quarry::Result<()> {
//! let mut engine = SearchEngine::from_config(EngineConfig::default())?;
//! let (documents, _report) = build::load_corpus(Path::new("corpus/"))?;
//! engine.index_corpus(documents);
//!
//! let response = engine.search("AND virus membrane NOT influenza AUTHOR Liu")?;
//! for result in &response.results {
//!     println!("{} {:.5}", result.document_id, result.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod authors;
pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod persist;
pub mod query;
pub mod ranking;
pub mod text;
pub mod tree;
pub mod types;
pub mod verify;

#[doc(hidden)]
pub mod testing;

pub use authors::{AuthorIndex, DEFAULT_BUCKET_COUNT};
pub use build::{ArticleMeta, MetadataTable};
pub use config::EngineConfig;
pub use engine::{RestoreReport, SearchEngine, SearchResponse, Statistics, WordCount};
pub use error::{Error, Result};
pub use persist::PersistFormat;
pub use query::{parse, Evaluation, QueryError, QueryExpr, QueryWarning};
pub use ranking::{TermMatching, MAX_RESULTS};
pub use text::{Normalizer, StopWords};
pub use tree::IndexTree;
pub use types::{DocId, Document, IndexEntry, RankedResult, PREVIEW_WORDS};
