// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the fields it
//! changes:
//!
//! ```json
//! { "term_matching": "normalized", "top_k": 10 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::authors::DEFAULT_BUCKET_COUNT;
use crate::error::{Error, Result};
use crate::persist::DEFAULT_DOC_ID_LEN;
use crate::ranking::{TermMatching, MAX_RESULTS};

/// Words listed in the statistics report.
pub const DEFAULT_TOP_WORDS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Author index buckets. Fixed for the life of the index.
    pub bucket_count: usize,

    /// Length of a document id. The line format tells ids from keys by it.
    pub doc_id_len: usize,

    /// Results returned per query, 1 to `MAX_RESULTS`
    pub top_k: usize,

    /// Words in the statistics report
    pub top_words: usize,

    pub term_matching: TermMatching,

    /// Stop-word file. The built-in English list when unset.
    pub stop_words: Option<PathBuf>,

    pub word_index_file: String,
    pub author_index_file: String,
    pub snapshot_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            doc_id_len: DEFAULT_DOC_ID_LEN,
            top_k: MAX_RESULTS,
            top_words: DEFAULT_TOP_WORDS,
            term_matching: TermMatching::Raw,
            stop_words: None,
            word_index_file: "word_index.txt".to_string(),
            author_index_file: "author_index.txt".to_string(),
            snapshot_file: "index.json".to_string(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: EngineConfig = serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(Error::Config("bucket_count must be at least 1".into()));
        }
        if self.doc_id_len == 0 {
            return Err(Error::Config("doc_id_len must be at least 1".into()));
        }
        if !(1..=MAX_RESULTS).contains(&self.top_k) {
            return Err(Error::Config(format!(
                "top_k must be between 1 and {}, got {}",
                MAX_RESULTS, self.top_k
            )));
        }
        for (name, file) in [
            ("word_index_file", &self.word_index_file),
            ("author_index_file", &self.author_index_file),
            ("snapshot_file", &self.snapshot_file),
        ] {
            if file.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
