// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quarry command-line interface.
//!
//! Four subcommands: `index` builds and saves the indexes, `search` runs a
//! boolean query, `stats` prints the corpus report and `inspect` summarizes
//! a saved index file. Engine settings come from `--config` and can be
//! overridden per flag.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use quarry::{EngineConfig, TermMatching};

#[derive(Parser)]
#[command(
    name = "quarry",
    about = "Boolean search over research-article corpora",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args)]
pub struct EngineArgs {
    /// JSON engine config (every field optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Stop-word file, one word per line (default: built-in English list)
    #[arg(long, global = true)]
    pub stop_words: Option<PathBuf>,

    /// How query terms are matched against article text when scoring
    #[arg(long, global = true, value_enum)]
    pub term_matching: Option<MatchingArg>,

    /// Length of a document id in saved index files
    #[arg(long, global = true)]
    pub doc_id_len: Option<usize>,
}

impl EngineArgs {
    /// File config (or defaults) with flag overrides applied.
    pub fn resolve(&self) -> quarry::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(path) = &self.stop_words {
            config.stop_words = Some(path.clone());
        }
        if let Some(matching) = self.term_matching {
            config.term_matching = matching.into();
        }
        if let Some(len) = self.doc_id_len {
            config.doc_id_len = len;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MatchingArg {
    /// Whitespace tokens compared verbatim
    Raw,
    /// Cleaned and stemmed, like the word index
    Normalized,
}

impl From<MatchingArg> for TermMatching {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Raw => TermMatching::Raw,
            MatchingArg::Normalized => TermMatching::Normalized,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build word and author indexes from a directory of article JSON files
    Index {
        /// Directory of CORD-19 style article files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the index files
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a JSON snapshot of both indexes
        #[arg(long)]
        json: bool,
    },

    /// Run a boolean query and show the top-ranked articles
    ///
    /// Query syntax: `[AND|OR] term... [NOT term] [AUTHOR surname]`.
    Search {
        /// Directory of CORD-19 style article files
        #[arg(short, long)]
        input: PathBuf,

        /// Restore indexes from this directory instead of rebuilding them
        #[arg(long)]
        index: Option<PathBuf>,

        /// Restore from the JSON snapshot rather than the line files
        #[arg(long, requires = "index")]
        json: bool,

        /// CORD-19 metadata.csv with publish dates and journals
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Search query
        query: String,

        /// Maximum number of results to return (1-15)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the opening words of the N-th result
        #[arg(long, value_name = "N")]
        open: Option<usize>,
    },

    /// Print corpus statistics and the most frequent words
    Stats {
        /// Directory of CORD-19 style article files
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Summarize a saved index file
    Inspect {
        /// Path to a word/author index file or a JSON snapshot
        file: PathBuf,
    },
}
